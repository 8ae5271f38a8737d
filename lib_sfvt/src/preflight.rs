//! Resolution of user supplied positions into validated alignment columns.
//!
//! This chains parsing, correction and validation,
//! and records the outcome of every [`ValidationRule`] for diagnostics.

use log::{debug, error, info};

use crate::{
    alignment::{AlignedSequence, ReferenceLookup},
    correction::{CorrectedPositionSet, build_correction_map, correct},
    error::{Error, Result},
    position::{DuplicatePolicy, PositionSet, parse_with_policy},
    validation::{
        ValidatedPositionSet, ValidationRule, check_corrected_not_empty, check_not_gap,
        check_positions_within_reference_length, check_within_bounds, validate,
    },
};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStatus {
    Passed,
    Failed(Error),
    /// An earlier rule failed.
    NotEvaluated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: ValidationRule,
    pub status: RuleStatus,
}

/// The outcome of resolving positions against a reference.
#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub positions: PositionSet,
    pub corrected: Option<CorrectedPositionSet>,
    pub outcomes: Vec<RuleOutcome>,
    validated: Option<ValidatedPositionSet>,
}

impl PreflightReport {
    pub fn passed(&self) -> bool {
        self.validated.is_some()
    }

    pub fn status(&self, rule: ValidationRule) -> Option<&RuleStatus> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.rule == rule)
            .map(|outcome| &outcome.status)
    }

    /// The first error, if any rule failed.
    pub fn first_failure(&self) -> Option<&Error> {
        self.outcomes.iter().find_map(|outcome| match &outcome.status {
            RuleStatus::Failed(error) => Some(error),
            _ => None,
        })
    }

    /// Returns the validated columns, or the error of the first failed rule.
    pub fn into_validated(self) -> Result<ValidatedPositionSet> {
        if let Some(validated) = self.validated {
            Ok(validated)
        } else {
            Err(self
                .first_failure()
                .cloned()
                .unwrap_or(Error::EmptyPositionSet))
        }
    }
}

/// Parses the raw positions and resolves them against the reference.
///
/// Malformed position specifications fail before any rule is evaluated.
pub fn resolve_positions(
    raw_positions: &str,
    duplicate_policy: DuplicatePolicy,
    reference: &ReferenceLookup,
) -> Result<PreflightReport> {
    let positions = parse_with_policy(raw_positions, duplicate_policy)?;
    preflight(positions, reference)
}

/// Evaluates all [`ValidationRule`]s in order.
///
/// Evaluation stops at the first failing rule, the remaining rules are reported as not evaluated.
/// Only an empty reference sequence aborts with [`Error::EmptyReference`] instead of a report.
pub fn preflight(positions: PositionSet, reference: &ReferenceLookup) -> Result<PreflightReport> {
    info!("Pre-flight starting");

    let mut outcomes = Vec::with_capacity(ValidationRule::ALL.len());
    let mut corrected = None;
    let mut validated = None;

    let mut record = |rule: ValidationRule, result: Result<()>| {
        let status = match result {
            Ok(()) => {
                debug!("Rule '{rule}' passed");
                RuleStatus::Passed
            }
            Err(error) => {
                error!("Rule '{rule}' failed: {error}");
                RuleStatus::Failed(error)
            }
        };
        let passed = status == RuleStatus::Passed;
        outcomes.push(RuleOutcome { rule, status });
        passed
    };

    'rules: {
        if !record(
            ValidationRule::ReferenceFound,
            if reference.found {
                Ok(())
            } else {
                Err(Error::ReferenceNotFound(reference.identifier.clone()))
            },
        ) {
            break 'rules;
        }
        let sequence: &AlignedSequence = &reference.aligned_sequence;
        if sequence.is_empty() {
            return Err(Error::EmptyReference);
        }
        info!("Reference sequence found in alignment: {}", reference.identifier);

        if !record(
            ValidationRule::PositionsExistInReference,
            check_positions_within_reference_length(sequence, &positions),
        ) {
            break 'rules;
        }

        let correction_map = build_correction_map(sequence)?;
        let corrected_positions = match correct(&positions, &correction_map) {
            Ok(corrected_positions) => corrected_positions,
            Err(error) => {
                record(ValidationRule::PositionsCorrected, Err(error));
                break 'rules;
            }
        };
        info!("Corrected positions: {:?}", corrected_positions.as_slice());

        if !record(
            ValidationRule::PositionsCorrected,
            check_corrected_not_empty(&corrected_positions),
        ) {
            corrected = Some(corrected_positions);
            break 'rules;
        }

        if !record(
            ValidationRule::CorrectedWithinBounds,
            check_within_bounds(sequence, &corrected_positions),
        ) {
            corrected = Some(corrected_positions);
            break 'rules;
        }

        if record(
            ValidationRule::CorrectedNotGap,
            check_not_gap(sequence, &corrected_positions),
        ) {
            validated = Some(validate(sequence, corrected_positions.clone())?);
        }
        corrected = Some(corrected_positions);
    }

    for rule in ValidationRule::ALL {
        if !outcomes.iter().any(|outcome| outcome.rule == rule) {
            outcomes.push(RuleOutcome {
                rule,
                status: RuleStatus::NotEvaluated,
            });
        }
    }

    if validated.is_some() {
        info!("Pre-flight passed");
    } else {
        error!("Pre-flight failed");
    }

    Ok(PreflightReport {
        positions,
        corrected,
        outcomes,
        validated,
    })
}
