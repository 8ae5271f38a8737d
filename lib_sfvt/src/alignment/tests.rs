use crate::error::Error;

use super::{AlignedSequence, Alignment, AlignmentRecord};

fn test_alignment() -> Alignment {
    Alignment::new(vec![
        AlignmentRecord::new("gb|CY010795|HA", "-AC-GT"),
        AlignmentRecord::new("gb|CY021716|HA", "TACCGT"),
        AlignmentRecord::new("gb|CY010796|HA", "TAC-GA"),
    ])
    .unwrap()
}

#[test]
fn residue_count_ignores_gaps() {
    let sequence = AlignedSequence::new("-A--BB---CCC----DDDD");
    assert_eq!(sequence.aligned_len(), 20);
    assert_eq!(sequence.residue_count(), 10);
}

#[test]
fn columns_are_one_based() {
    let sequence = AlignedSequence::new("-AC");
    assert_eq!(sequence.column(0), None);
    assert_eq!(sequence.column(1), Some('-'));
    assert_eq!(sequence.column(3), Some('C'));
    assert_eq!(sequence.column(4), None);
    assert!(sequence.is_gap(1));
    assert!(!sequence.is_gap(2));
    assert!(!sequence.is_gap(4));
}

#[test]
fn empty_alignment_is_rejected() {
    assert_eq!(Alignment::new(Vec::new()).unwrap_err(), Error::EmptyAlignment);
}

#[test]
fn unequal_lengths_are_rejected() {
    let error = Alignment::new(vec![
        AlignmentRecord::new("a", "ACGT"),
        AlignmentRecord::new("b", "AC-"),
    ])
    .unwrap_err();
    assert_eq!(
        error,
        Error::UnequalSequenceLength {
            id: "b".to_string(),
            length: 3,
            expected_length: 4,
        }
    );
}

#[test]
fn reference_is_found_by_substring() {
    let alignment = test_alignment();
    assert_eq!(alignment.aligned_len(), 6);

    let lookup = alignment.find_reference("CY021716");
    assert!(lookup.found);
    assert_eq!(lookup.aligned_sequence.to_string(), "TACCGT");
}

#[test]
fn last_matching_reference_wins() {
    let lookup = test_alignment().find_reference("CY01079");
    assert!(lookup.found);
    assert_eq!(lookup.aligned_sequence.to_string(), "TAC-GA");
}

#[test]
fn missing_reference_is_reported() {
    let lookup = test_alignment().find_reference("AB01223");
    assert!(!lookup.found);
    assert!(lookup.aligned_sequence.is_empty());
}

#[test]
fn non_ascii_characters_count_as_one_column() {
    let sequence = AlignedSequence::new("é-A");
    assert_eq!(sequence.aligned_len(), 3);
    assert_eq!(sequence.residue_count(), 2);
    assert_eq!(sequence.column(1), Some('é'));
    assert_eq!(sequence.column(3), Some('A'));
    assert_eq!(sequence.to_string(), "é-A");
}
