use std::fmt::Display;

use log::{debug, warn};

use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// The character marking a gap in an aligned sequence.
pub const GAP: char = '-';

/// A sequence as it appears in an alignment, including gap characters.
///
/// Positions into the residues ignore gaps, columns count gaps.
/// Both are 1-based and count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignedSequence {
    sequence: Vec<char>,
}

impl AlignedSequence {
    pub fn new(sequence: impl AsRef<str>) -> Self {
        Self {
            sequence: sequence.as_ref().chars().collect(),
        }
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.sequence.iter().copied()
    }

    /// The length of the sequence including gaps.
    pub fn aligned_len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// The amount of non-gap characters.
    pub fn residue_count(&self) -> usize {
        self.chars().filter(|&c| c != GAP).count()
    }

    /// Returns the character at the given 1-based column, or `None` if the column is out of bounds.
    pub fn column(&self, column: usize) -> Option<char> {
        column
            .checked_sub(1)
            .and_then(|index| self.sequence.get(index).copied())
    }

    /// Returns true if the given 1-based column is a gap.
    pub fn is_gap(&self, column: usize) -> bool {
        self.column(column) == Some(GAP)
    }
}

impl Display for AlignedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars().try_for_each(|c| write!(f, "{c}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub id: String,
    pub comment: String,
    pub sequence: AlignedSequence,
}

impl AlignmentRecord {
    pub fn new(id: impl Into<String>, sequence: impl AsRef<str>) -> Self {
        Self {
            id: id.into(),
            comment: String::new(),
            sequence: AlignedSequence::new(sequence),
        }
    }
}

/// A multiple sequence alignment whose records all have the same aligned length.
#[derive(Debug, Clone)]
pub struct Alignment {
    records: Vec<AlignmentRecord>,
}

/// The outcome of searching an alignment for the reference sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLookup {
    pub identifier: String,
    pub found: bool,
    pub aligned_sequence: AlignedSequence,
}

impl Alignment {
    pub fn new(records: Vec<AlignmentRecord>) -> Result<Self> {
        let Some(first) = records.first() else {
            return Err(Error::EmptyAlignment);
        };
        let expected_length = first.sequence.aligned_len();

        if let Some(record) = records
            .iter()
            .find(|record| record.sequence.aligned_len() != expected_length)
        {
            return Err(Error::UnequalSequenceLength {
                id: record.id.clone(),
                length: record.sequence.aligned_len(),
                expected_length,
            });
        }

        debug!(
            "Created alignment of {} sequences with length {expected_length}",
            records.len()
        );
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }

    /// The amount of columns of the alignment.
    pub fn aligned_len(&self) -> usize {
        self.records
            .first()
            .map(|record| record.sequence.aligned_len())
            .unwrap_or(0)
    }

    /// Searches the record whose id contains the given identifier.
    ///
    /// Identifiers in alignment files often carry a prefix or suffix around the accession,
    /// hence this is a substring match.
    /// If multiple records match, the last one is used.
    pub fn find_reference(&self, identifier: &str) -> ReferenceLookup {
        let matches: Vec<_> = self
            .records
            .iter()
            .filter(|record| record.id.contains(identifier))
            .collect();

        if matches.len() > 1 {
            warn!(
                "Reference identifier '{identifier}' matches {} sequences: {:?}. Using the last one.",
                matches.len(),
                matches.iter().map(|record| &record.id).collect::<Vec<_>>()
            );
        }

        match matches.last() {
            Some(record) => {
                debug!("Found reference '{identifier}' as '{}'", record.id);
                ReferenceLookup {
                    identifier: identifier.to_string(),
                    found: true,
                    aligned_sequence: record.sequence.clone(),
                }
            }
            None => ReferenceLookup {
                identifier: identifier.to_string(),
                found: false,
                aligned_sequence: AlignedSequence::default(),
            },
        }
    }
}
