use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("The position specification '{spec}' is malformed: {issue}.")]
    MalformedPositionSpec {
        spec: String,
        issue: PositionSpecIssue,
    },

    #[error("The reference sequence is empty.")]
    EmptyReference,

    #[error(
        "Position {position} does not exist in the reference, which has only {residue_count} non-gap residues."
    )]
    UnknownPosition {
        position: usize,
        residue_count: usize,
    },

    #[error(
        "Corrected position {column} is outside of the aligned reference of length {aligned_length}."
    )]
    PositionOutOfBounds {
        column: usize,
        aligned_length: usize,
    },

    #[error("Corrected position {column} is a gap in the aligned reference.")]
    CorrectedPositionIsGap { column: usize },

    #[error("No positions remain after correction.")]
    EmptyPositionSet,

    #[error("No sequence in the alignment matches the reference identifier '{0}'.")]
    ReferenceNotFound(String),

    #[error("The alignment contains no sequences.")]
    EmptyAlignment,

    #[error(
        "Sequence '{id}' has length {length}, but the alignment has length {expected_length}."
    )]
    UnequalSequenceLength {
        id: String,
        length: usize,
        expected_length: usize,
    },

    #[error("The metadata table has no '{0}' column.")]
    MissingAccessionColumn(String),

    #[error("Metadata row {row} has {actual} fields, but the header has {expected}.")]
    MetadataRowLength {
        row: usize,
        actual: usize,
        expected: usize,
    },
}

/// The reason why a position specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSpecIssue {
    Empty,
    MalformedGroup(String),
    DescendingRange { start: usize, end: usize },
    /// Contains the offending group, if the positions were parsed from text.
    ZeroPosition(Option<String>),
}

impl Display for PositionSpecIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSpecIssue::Empty => write!(f, "no positions given"),
            PositionSpecIssue::MalformedGroup(group) => write!(
                f,
                "'{group}' is neither a single position nor a range 'start-end'"
            ),
            PositionSpecIssue::DescendingRange { start, end } => {
                write!(f, "the range {start}-{end} ends before it starts")
            }
            PositionSpecIssue::ZeroPosition(Some(group)) => {
                write!(f, "'{group}' contains position 0, but positions start at 1")
            }
            PositionSpecIssue::ZeroPosition(None) => {
                write!(f, "it contains position 0, but positions start at 1")
            }
        }
    }
}
