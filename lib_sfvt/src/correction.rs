//! Translation of ungapped reference positions into alignment columns.
//!
//! Insertions in other sequences of the alignment show up as gaps in the aligned reference.
//! Hence the n-th residue of the reference is generally not in column n,
//! but shifted right by the amount of gaps before it.

use std::ops::Deref;

use log::{debug, trace};

use crate::{
    alignment::{AlignedSequence, GAP},
    error::{Error, Result},
    position::PositionSet,
};


/// Maps each 1-based ungapped reference position to its 1-based alignment column.
///
/// The map is total over `1..=residue_count` and strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCorrectionMap {
    /// `columns[position - 1]` is the column of `position`.
    columns: Vec<usize>,
}

impl IndexCorrectionMap {
    /// The amount of residues in the reference, which is the largest valid position.
    pub fn residue_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the column of the given ungapped position, if it exists.
    pub fn get(&self, position: usize) -> Option<usize> {
        position
            .checked_sub(1)
            .and_then(|index| self.columns.get(index).copied())
    }

    /// Iterates over `(position, column)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, &column)| (index + 1, column))
    }
}

/// Alignment columns obtained by correcting a [`PositionSet`].
///
/// These have not been validated against the reference yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedPositionSet {
    columns: Vec<usize>,
}

impl CorrectedPositionSet {
    /// Wraps columns that were computed elsewhere, e.g. loaded from a previous run.
    pub fn from_columns(columns: Vec<usize>) -> Self {
        Self { columns }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<usize> {
        self.columns
    }
}

impl Deref for CorrectedPositionSet {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.columns
    }
}

/// Builds the correction map of an aligned reference sequence.
///
/// A reference consisting only of gaps results in an empty map.
pub fn build_correction_map(reference: &AlignedSequence) -> Result<IndexCorrectionMap> {
    if reference.is_empty() {
        return Err(Error::EmptyReference);
    }

    let mut columns = Vec::with_capacity(reference.aligned_len());
    let mut char_count = 1;
    let mut dash_count = 0;

    for c in reference.chars() {
        if c == GAP {
            dash_count += 1;
        } else {
            columns.push(char_count + dash_count);
            char_count += 1;
        }
    }

    debug!(
        "Built correction map over {} residues and {dash_count} gaps",
        columns.len()
    );
    trace!("Correction map: {columns:?}");

    Ok(IndexCorrectionMap { columns })
}

/// Translates each position into its alignment column.
///
/// Fails with [`Error::UnknownPosition`] on the first position that exceeds the residue count.
pub fn correct(
    positions: &PositionSet,
    correction_map: &IndexCorrectionMap,
) -> Result<CorrectedPositionSet> {
    let columns = positions
        .iter()
        .map(|position| {
            correction_map
                .get(position)
                .ok_or(Error::UnknownPosition {
                    position,
                    residue_count: correction_map.residue_count(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Corrected positions {positions} to columns {columns:?}");
    Ok(CorrectedPositionSet { columns })
}
