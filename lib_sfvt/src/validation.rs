use std::{fmt::Display, ops::Deref};

use log::debug;

use crate::{
    alignment::AlignedSequence,
    correction::CorrectedPositionSet,
    error::{Error, Result},
    position::PositionSet,
};

#[cfg(test)]
mod tests;

/// The rules a set of requested positions has to pass before variant types are extracted.
///
/// The rules are evaluated in the order of declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// The reference identifier matches a sequence of the alignment.
    ReferenceFound,
    /// Every requested position exists among the residues of the reference.
    PositionsExistInReference,
    /// Correction produced at least one column.
    PositionsCorrected,
    /// Every corrected column lies within the aligned reference.
    CorrectedWithinBounds,
    /// No corrected column is a gap in the aligned reference.
    CorrectedNotGap,
}

impl ValidationRule {
    pub const ALL: [Self; 5] = [
        Self::ReferenceFound,
        Self::PositionsExistInReference,
        Self::PositionsCorrected,
        Self::CorrectedWithinBounds,
        Self::CorrectedNotGap,
    ];
}

impl Display for ValidationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValidationRule::ReferenceFound => "reference found",
            ValidationRule::PositionsExistInReference => "positions exist in reference",
            ValidationRule::PositionsCorrected => "positions corrected",
            ValidationRule::CorrectedWithinBounds => "corrected positions within bounds",
            ValidationRule::CorrectedNotGap => "corrected positions are not gaps",
        };
        write!(f, "{name}")
    }
}

/// Alignment columns that passed all validation rules.
///
/// Every column is 1-based, within the aligned reference and not a gap in the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPositionSet {
    columns: Vec<usize>,
}

impl ValidatedPositionSet {
    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }
}

impl Deref for ValidatedPositionSet {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.columns
    }
}

/// Returns true if every raw position exists among the ungapped residues of the reference.
pub fn positions_within_reference_length(
    reference: &AlignedSequence,
    positions: &PositionSet,
) -> bool {
    check_positions_within_reference_length(reference, positions).is_ok()
}

pub fn check_positions_within_reference_length(
    reference: &AlignedSequence,
    positions: &PositionSet,
) -> Result<()> {
    let residue_count = reference.residue_count();
    match positions.first_above(residue_count) {
        Some(position) => Err(Error::UnknownPosition {
            position,
            residue_count,
        }),
        None => Ok(()),
    }
}

pub fn check_corrected_not_empty(corrected: &CorrectedPositionSet) -> Result<()> {
    if corrected.is_empty() {
        Err(Error::EmptyPositionSet)
    } else {
        Ok(())
    }
}

pub fn check_within_bounds(
    reference: &AlignedSequence,
    corrected: &CorrectedPositionSet,
) -> Result<()> {
    let aligned_length = reference.aligned_len();
    match corrected
        .iter()
        .find(|&&column| column == 0 || column > aligned_length)
    {
        Some(&column) => Err(Error::PositionOutOfBounds {
            column,
            aligned_length,
        }),
        None => Ok(()),
    }
}

/// Expects all columns to be within bounds.
pub fn check_not_gap(reference: &AlignedSequence, corrected: &CorrectedPositionSet) -> Result<()> {
    match corrected.iter().find(|&&column| reference.is_gap(column)) {
        Some(&column) => Err(Error::CorrectedPositionIsGap { column }),
        None => Ok(()),
    }
}

/// Validates corrected columns against the aligned reference.
///
/// The bounds check runs first, the gap check only if all columns are in bounds.
pub fn validate(
    reference: &AlignedSequence,
    corrected: CorrectedPositionSet,
) -> Result<ValidatedPositionSet> {
    check_within_bounds(reference, &corrected)?;
    check_not_gap(reference, &corrected)?;

    debug!("Validated columns {:?}", corrected.as_slice());
    Ok(ValidatedPositionSet {
        columns: corrected.into_columns(),
    })
}

/// Like [`validate`], but only reports whether the columns are valid.
pub fn is_valid(reference: &AlignedSequence, corrected: &CorrectedPositionSet) -> bool {
    check_within_bounds(reference, corrected).is_ok() && check_not_gap(reference, corrected).is_ok()
}
