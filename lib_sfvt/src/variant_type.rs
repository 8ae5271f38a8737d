use std::collections::HashMap;

use log::{debug, info};

use crate::{
    alignment::Alignment,
    error::{Error, Result},
    validation::ValidatedPositionSet,
};


/// The variant type of a single sequence of the alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantAssignment {
    pub accession: String,
    pub variant_type: String,
}

/// The amount of sequences sharing a variant type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantTypeCount {
    pub variant_type_id: String,
    pub variant_type: String,
    pub count: usize,
}

/// Variant types ranked by their frequency.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariantTypeTable {
    counts: Vec<VariantTypeCount>,
    ids: HashMap<String, usize>,
}

/// Returns the identifier of the variant type with the given 1-based rank.
pub fn variant_type_id(rank: usize) -> String {
    format!("VT-{rank:03}")
}

/// Concatenates the characters at the validated columns for each sequence.
///
/// The columns must have been validated against a reference from the same alignment.
pub fn extract_variant_types(
    alignment: &Alignment,
    columns: &ValidatedPositionSet,
) -> Result<Vec<VariantAssignment>> {
    let aligned_length = alignment.aligned_len();
    let assignments = alignment
        .records()
        .iter()
        .map(|record| {
            let variant_type = columns
                .iter()
                .map(|&column| {
                    record
                        .sequence
                        .column(column)
                        .ok_or(Error::PositionOutOfBounds {
                            column,
                            aligned_length,
                        })
                })
                .collect::<Result<String>>()?;
            Ok(VariantAssignment {
                accession: record.id.clone(),
                variant_type,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Extracted {} variant type assignments", assignments.len());
    Ok(assignments)
}

impl VariantTypeTable {
    /// Counts the sequences per variant type.
    ///
    /// Variant types are ranked by count in descending order.
    /// Ties keep the order in which the variant types first appear in the assignments.
    pub fn count(assignments: &[VariantAssignment]) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut first_seen = HashMap::new();

        for assignment in assignments {
            let index = *first_seen
                .entry(assignment.variant_type.as_str())
                .or_insert_with(|| {
                    counts.push((assignment.variant_type.clone(), 0));
                    counts.len() - 1
                });
            counts[index].1 += 1;
        }

        // Stable, so ties stay in first-seen order.
        counts.sort_by(|(_, a), (_, b)| b.cmp(a));

        let counts: Vec<_> = counts
            .into_iter()
            .enumerate()
            .map(|(index, (variant_type, count))| VariantTypeCount {
                variant_type_id: variant_type_id(index + 1),
                variant_type,
                count,
            })
            .collect();
        let ids = counts
            .iter()
            .enumerate()
            .map(|(index, count)| (count.variant_type.clone(), index))
            .collect();

        let table = Self { counts, ids };
        info!("Sequences per variant type:\n{table}");
        table
    }

    pub fn counts(&self) -> &[VariantTypeCount] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent variant types.
    pub fn top(&self, n: usize) -> &[VariantTypeCount] {
        &self.counts[..n.min(self.counts.len())]
    }

    pub fn get(&self, variant_type: &str) -> Option<&VariantTypeCount> {
        self.ids.get(variant_type).map(|&index| &self.counts[index])
    }

    pub fn variant_type_id(&self, variant_type: &str) -> Option<&str> {
        self.get(variant_type)
            .map(|count| count.variant_type_id.as_str())
    }
}

impl std::fmt::Display for VariantTypeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .counts
            .iter()
            .map(|count| count.variant_type.len())
            .max()
            .unwrap_or(0)
            .max("variant_type".len());

        writeln!(f, "{:<8} {:<width$} count", "VT", "variant_type")?;
        for count in &self.counts {
            writeln!(
                f,
                "{:<8} {:<width$} {}",
                count.variant_type_id, count.variant_type, count.count
            )?;
        }
        Ok(())
    }
}
