use crate::{
    alignment::{AlignedSequence, Alignment, AlignmentRecord, ReferenceLookup},
    error::{Error, PositionSpecIssue},
    position::{DuplicatePolicy, PositionSet},
    validation::ValidationRule,
};

use super::{RuleStatus, preflight, resolve_positions};

fn found(sequence: &str) -> ReferenceLookup {
    ReferenceLookup {
        identifier: "ref".to_string(),
        found: true,
        aligned_sequence: AlignedSequence::new(sequence),
    }
}

#[test]
fn all_rules_pass() {
    let report = resolve_positions("1,3,5", DuplicatePolicy::Preserve, &found("-A--BB---CCC----DDDD"))
        .unwrap();

    assert!(report.passed());
    assert!(
        report
            .outcomes
            .iter()
            .all(|outcome| outcome.status == RuleStatus::Passed)
    );
    assert_eq!(report.outcomes.len(), ValidationRule::ALL.len());
    assert_eq!(report.into_validated().unwrap().as_slice(), [2, 6, 11]);
}

#[test]
fn missing_reference_stops_evaluation() {
    let alignment = Alignment::new(vec![AlignmentRecord::new("CY010795", "AC-GT")]).unwrap();
    let lookup = alignment.find_reference("AB01223");
    let report = resolve_positions("1", DuplicatePolicy::Preserve, &lookup).unwrap();

    assert!(!report.passed());
    assert_eq!(
        report.status(ValidationRule::ReferenceFound),
        Some(&RuleStatus::Failed(Error::ReferenceNotFound(
            "AB01223".to_string()
        )))
    );
    assert_eq!(
        report.status(ValidationRule::CorrectedNotGap),
        Some(&RuleStatus::NotEvaluated)
    );
    assert_eq!(
        report.into_validated(),
        Err(Error::ReferenceNotFound("AB01223".to_string()))
    );
}

#[test]
fn position_beyond_residues_fails_before_correction() {
    let report =
        resolve_positions("1,3,5", DuplicatePolicy::Preserve, &found("-A--BB----")).unwrap();

    assert!(!report.passed());
    assert_eq!(report.status(ValidationRule::ReferenceFound), Some(&RuleStatus::Passed));
    assert_eq!(
        report.status(ValidationRule::PositionsExistInReference),
        Some(&RuleStatus::Failed(Error::UnknownPosition {
            position: 5,
            residue_count: 3,
        }))
    );
    assert!(report.corrected.is_none());
    assert_eq!(
        report.status(ValidationRule::PositionsCorrected),
        Some(&RuleStatus::NotEvaluated)
    );
}

#[test]
fn empty_reference_is_fatal() {
    assert_eq!(
        resolve_positions("1,3,5", DuplicatePolicy::Preserve, &found("")).unwrap_err(),
        Error::EmptyReference
    );
}

#[test]
fn malformed_spec_fails_before_rules() {
    assert_eq!(
        resolve_positions("10 21", DuplicatePolicy::Preserve, &found("ACGT")).unwrap_err(),
        Error::MalformedPositionSpec {
            spec: "10 21".to_string(),
            issue: PositionSpecIssue::MalformedGroup("10 21".to_string()),
        }
    );
}

#[test]
fn empty_position_set_fails() {
    let report = preflight(PositionSet::new(Vec::new()).unwrap(), &found("ACGT")).unwrap();

    assert!(!report.passed());
    assert_eq!(
        report.status(ValidationRule::PositionsCorrected),
        Some(&RuleStatus::Failed(Error::EmptyPositionSet))
    );
    assert_eq!(report.corrected.map(|corrected| corrected.len()), Some(0));
}

#[test]
fn deduplication_is_applied() {
    let report = resolve_positions("2, 1-2", DuplicatePolicy::Deduplicate, &found("-AB-C")).unwrap();
    assert_eq!(report.positions.iter().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(report.into_validated().unwrap().as_slice(), [2, 3]);
}

#[test]
fn huge_range_fails_as_unknown_position() {
    let report = resolve_positions(
        "1-18446744073709551615",
        DuplicatePolicy::Preserve,
        &found("-AB-C"),
    )
    .unwrap();

    assert!(!report.passed());
    assert_eq!(
        report.status(ValidationRule::PositionsExistInReference),
        Some(&RuleStatus::Failed(Error::UnknownPosition {
            position: 4,
            residue_count: 3,
        }))
    );
    assert_eq!(
        report.into_validated(),
        Err(Error::UnknownPosition {
            position: 4,
            residue_count: 3,
        })
    );
}
