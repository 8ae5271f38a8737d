//! Parsing of user supplied reference positions.
//!
//! A position specification is a comma separated list of groups.
//! Each group is either a single 1-based position or an inclusive range `start-end`.
//! Whitespace around positions, dashes and commas is ignored, e.g. `"10 - 21, 32, 43"`.
//!
//! Negative positions are not supported.
//! A leading dash makes the group malformed instead of being read as a sign,
//! since positions in the ungapped reference start at 1.

use std::{fmt::Display, iter};

use log::{debug, trace};
use nom::{
    IResult, Parser,
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded, tuple},
};

use crate::error::{Error, PositionSpecIssue, Result};


/// How repeated positions in a specification are treated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every position as often as the specification produces it.
    #[default]
    Preserve,
    /// Keep each position only once.
    Deduplicate,
}

/// Ascending, strictly positive, 1-based positions in the ungapped reference sequence.
///
/// Ranges are kept as runs and only expanded while iterating,
/// so a range reaching far beyond any reference costs no memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionSet {
    runs: Vec<PositionRun>,
}

/// The positions `start..=end`, each occurring `multiplicity` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PositionRun {
    start: usize,
    end: usize,
    multiplicity: usize,
}

impl PositionSet {
    /// Creates a position set from arbitrary positions.
    ///
    /// Fails if a position is zero.
    pub fn new(positions: Vec<usize>) -> Result<Self> {
        if positions.contains(&0) {
            return Err(Error::MalformedPositionSpec {
                spec: format!("{positions:?}"),
                issue: PositionSpecIssue::ZeroPosition(None),
            });
        }

        Ok(Self::from_ranges(
            positions.into_iter().map(|position| (position, position)),
        ))
    }

    /// Merges inclusive, non-empty ranges into runs of equal multiplicity.
    fn from_ranges(ranges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        // Exclusive ends may lie at `usize::MAX + 1`.
        let mut boundaries: Vec<(u128, isize)> = ranges
            .into_iter()
            .flat_map(|(start, end)| [(start as u128, 1), (end as u128 + 1, -1)])
            .collect();
        boundaries.sort_unstable();

        let mut positions = Self::default();
        let mut multiplicity = 0;
        let mut previous = 0;
        for (boundary, delta) in boundaries {
            if multiplicity > 0 && boundary > previous {
                positions.push_run(PositionRun {
                    start: previous as usize,
                    end: (boundary - 1) as usize,
                    multiplicity: multiplicity as usize,
                });
            }
            multiplicity += delta;
            previous = boundary;
        }
        positions
    }

    fn push_run(&mut self, run: PositionRun) {
        if let Some(last) = self.runs.last_mut() {
            if last.multiplicity == run.multiplicity && last.end.checked_add(1) == Some(run.start) {
                last.end = run.end;
                return;
            }
        }
        self.runs.push(run);
    }

    /// Iterates over the positions in ascending order, repeated positions included.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.runs.iter().flat_map(|run| {
            (run.start..=run.end).flat_map(move |position| iter::repeat_n(position, run.multiplicity))
        })
    }

    /// The smallest position greater than `bound`, if any.
    pub fn first_above(&self, bound: usize) -> Option<usize> {
        self.runs
            .iter()
            .find(|run| run.end > bound)
            .map(|run| run.start.max(bound + 1))
    }

    pub fn deduplicated(self) -> Self {
        let mut positions = Self::default();
        for run in self.runs {
            positions.push_run(PositionRun {
                multiplicity: 1,
                ..run
            });
        }
        positions
    }
}

impl Display for PositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, run) in self.runs.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if run.start == run.end {
                write!(f, "{}", run.start)?;
            } else {
                write!(f, "{}-{}", run.start, run.end)?;
            }
            if run.multiplicity > 1 {
                write!(f, " (x{})", run.multiplicity)?;
            }
        }
        Ok(())
    }
}

/// Parses a position specification, preserving repeated positions.
pub fn parse(raw: &str) -> Result<PositionSet> {
    parse_with_policy(raw, DuplicatePolicy::Preserve)
}

pub fn parse_with_policy(raw: &str, duplicate_policy: DuplicatePolicy) -> Result<PositionSet> {
    debug!("Parsing raw positions '{raw}'");

    let malformed = |issue| Error::MalformedPositionSpec {
        spec: raw.to_string(),
        issue,
    };

    if raw.trim().is_empty() {
        return Err(malformed(PositionSpecIssue::Empty));
    }

    let mut ranges = Vec::new();
    for group in raw.split(',') {
        let group = group.trim();
        trace!("Parsing position group '{group}'");

        let (_, (start, end)) = all_consuming(parse_group)
            .parse(group)
            .map_err(|_| malformed(PositionSpecIssue::MalformedGroup(group.to_string())))?;
        let end = end.unwrap_or(start);

        if start == 0 || end == 0 {
            return Err(malformed(PositionSpecIssue::ZeroPosition(Some(
                group.to_string(),
            ))));
        }
        if start > end {
            return Err(malformed(PositionSpecIssue::DescendingRange { start, end }));
        }

        ranges.push((start, end));
    }

    let mut positions = PositionSet::from_ranges(ranges);
    if duplicate_policy == DuplicatePolicy::Deduplicate {
        positions = positions.deduplicated();
    }

    debug!("Parsed positions: {positions}");
    Ok(positions)
}

/// Parses `start` or `start-end` without surrounding whitespace.
fn parse_group(input: &str) -> IResult<&str, (usize, Option<usize>)> {
    tuple((
        parse_position,
        opt(preceded(delimited(space0, char('-'), space0), parse_position)),
    ))
    .parse(input)
}

fn parse_position(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |digits: &str| digits.parse::<usize>()).parse(input)
}
