use crate::{
    alignment::AlignedSequence,
    correction::{CorrectedPositionSet, build_correction_map, correct},
    error::Error,
    position::parse,
};

use super::{
    ValidationRule, check_corrected_not_empty, is_valid, positions_within_reference_length,
    validate,
};

#[test]
fn corrected_positions_are_valid() {
    let reference = AlignedSequence::new("-A--BB---CCC----DDDD");
    let map = build_correction_map(&reference).unwrap();
    let corrected = correct(&parse("1,3,5").unwrap(), &map).unwrap();

    assert!(is_valid(&reference, &corrected));
    assert_eq!(validate(&reference, corrected).unwrap().as_slice(), [2, 6, 11]);
}

#[test]
fn out_of_bounds_column_fails() {
    let reference = AlignedSequence::new("-A--BB");
    let corrected = CorrectedPositionSet::from_columns(vec![2, 7]);

    assert!(!is_valid(&reference, &corrected));
    assert_eq!(
        validate(&reference, corrected),
        Err(Error::PositionOutOfBounds {
            column: 7,
            aligned_length: 6,
        })
    );
}

#[test]
fn bounds_are_checked_before_gaps() {
    let reference = AlignedSequence::new("-A--BB");
    let corrected = CorrectedPositionSet::from_columns(vec![1, 9]);

    assert_eq!(
        validate(&reference, corrected),
        Err(Error::PositionOutOfBounds {
            column: 9,
            aligned_length: 6,
        })
    );
}

#[test]
fn column_on_gap_fails() {
    // The map was built from a reference that was edited afterwards.
    let original = AlignedSequence::new("-A--BB---CCC");
    let edited = AlignedSequence::new("-A--B----CCC");
    let map = build_correction_map(&original).unwrap();
    let corrected = correct(&parse("1-3").unwrap(), &map).unwrap();

    assert!(is_valid(&original, &corrected));
    assert_eq!(
        validate(&edited, corrected),
        Err(Error::CorrectedPositionIsGap { column: 6 })
    );
}

#[test]
fn column_zero_is_out_of_bounds() {
    let reference = AlignedSequence::new("AC");
    assert_eq!(
        validate(&reference, CorrectedPositionSet::from_columns(vec![0])),
        Err(Error::PositionOutOfBounds {
            column: 0,
            aligned_length: 2,
        })
    );
}

#[test]
fn raw_positions_are_checked_against_residue_count() {
    let reference = AlignedSequence::new("-A--BB----");
    assert!(positions_within_reference_length(
        &reference,
        &parse("1-3").unwrap()
    ));
    assert!(!positions_within_reference_length(
        &reference,
        &parse("1,3,5").unwrap()
    ));

    // Position 5 is within the aligned length, but not among the residues.
    assert!(reference.aligned_len() >= 5);
}

#[test]
fn empty_correction_fails() {
    assert_eq!(
        check_corrected_not_empty(&CorrectedPositionSet::from_columns(Vec::new())),
        Err(Error::EmptyPositionSet)
    );
}

#[test]
fn rules_are_ordered() {
    assert_eq!(ValidationRule::ALL[0], ValidationRule::ReferenceFound);
    assert_eq!(ValidationRule::ALL[4], ValidationRule::CorrectedNotGap);
}
