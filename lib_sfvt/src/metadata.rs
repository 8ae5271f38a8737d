//! Sequence metadata and its cross-tabulation against variant types.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::{
    error::{Error, Result},
    variant_type::{VariantAssignment, VariantTypeTable, variant_type_id},
};


/// The column that links metadata rows to alignment records.
pub const ACCESSION_COLUMN: &str = "accession";

/// A table of metadata with one row per accession.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    accession_column: usize,
    row_by_accession: HashMap<String, usize>,
}

/// Counts of sequences per variant type and value of one metadata field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCrossTab {
    pub field: String,
    pub rows: Vec<CrossTabRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossTabRow {
    pub variant_type_id: String,
    pub value: String,
    pub count: usize,
}

/// A row of the outer join of variant type assignments and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub accession: String,
    /// Empty if the accession has metadata but no sequence.
    pub variant_type: String,
    pub variant_type_id: String,
    /// One value per metadata field, empty if the sequence has no metadata.
    pub fields: Vec<String>,
}

impl MetadataTable {
    /// Creates a metadata table from a header and rows of the same length.
    ///
    /// If an accession occurs more than once, the first row is used for joining.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let accession_column = columns
            .iter()
            .position(|column| column == ACCESSION_COLUMN)
            .ok_or_else(|| Error::MissingAccessionColumn(ACCESSION_COLUMN.to_string()))?;

        let mut row_by_accession = HashMap::new();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::MetadataRowLength {
                    row: index + 1,
                    actual: row.len(),
                    expected: columns.len(),
                });
            }

            let accession = &row[accession_column];
            if row_by_accession.contains_key(accession) {
                warn!("Accession '{accession}' occurs more than once in the metadata");
            } else {
                row_by_accession.insert(accession.clone(), index);
            }
        }

        debug!(
            "Loaded metadata with {} rows and columns {columns:?}",
            rows.len()
        );
        Ok(Self {
            columns,
            rows,
            accession_column,
            row_by_accession,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The metadata columns apart from the accession.
    pub fn fields(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != self.accession_column)
            .map(|(index, column)| (index, column.as_str()))
    }

    pub fn row(&self, accession: &str) -> Option<&[String]> {
        self.row_by_accession
            .get(accession)
            .map(|&index| self.rows[index].as_slice())
    }

    /// Joins the variant type assignments with the metadata, keeping rows from both sides.
    ///
    /// Assignments come first in their order, followed by metadata rows without a sequence.
    pub fn outer_join(
        &self,
        table: &VariantTypeTable,
        assignments: &[VariantAssignment],
    ) -> Vec<JoinedRow> {
        let field_indices: Vec<_> = self.fields().map(|(index, _)| index).collect();
        let fields_of = |row: Option<&[String]>| -> Vec<String> {
            field_indices
                .iter()
                .map(|&index| row.map(|row| row[index].clone()).unwrap_or_default())
                .collect()
        };

        let mut joined: Vec<_> = assignments
            .iter()
            .map(|assignment| JoinedRow {
                accession: assignment.accession.clone(),
                variant_type: assignment.variant_type.clone(),
                variant_type_id: table
                    .variant_type_id(&assignment.variant_type)
                    .unwrap_or_default()
                    .to_string(),
                fields: fields_of(self.row(&assignment.accession)),
            })
            .collect();

        let sequenced: HashSet<_> = assignments
            .iter()
            .map(|assignment| assignment.accession.as_str())
            .collect();
        for row in &self.rows {
            let accession = &row[self.accession_column];
            if !sequenced.contains(accession.as_str()) {
                joined.push(JoinedRow {
                    accession: accession.clone(),
                    variant_type: String::new(),
                    variant_type_id: String::new(),
                    fields: fields_of(Some(row.as_slice())),
                });
            }
        }

        joined
    }
}

/// Counts sequences per variant type and metadata value, for every metadata field.
///
/// Only the `top` most frequent variant types are considered.
/// Sequences without metadata count towards the empty value.
/// Rows are ordered by variant type rank, then by the first occurrence of the value.
pub fn cross_tabulate(
    table: &VariantTypeTable,
    assignments: &[VariantAssignment],
    metadata: &MetadataTable,
    top: usize,
) -> Vec<FieldCrossTab> {
    let ranks: HashMap<_, _> = table
        .top(top)
        .iter()
        .enumerate()
        .map(|(index, count)| (count.variant_type.as_str(), index + 1))
        .collect();

    metadata
        .fields()
        .map(|(field_index, field)| {
            let mut rows: Vec<(usize, CrossTabRow)> = Vec::new();
            let mut row_index = HashMap::new();

            for assignment in assignments {
                let Some(&rank) = ranks.get(assignment.variant_type.as_str()) else {
                    continue;
                };

                let value = metadata
                    .row(&assignment.accession)
                    .map(|row| row[field_index].as_str())
                    .unwrap_or_default();
                let index = *row_index.entry((rank, value)).or_insert_with(|| {
                    rows.push((
                        rank,
                        CrossTabRow {
                            variant_type_id: variant_type_id(rank),
                            value: value.to_string(),
                            count: 0,
                        },
                    ));
                    rows.len() - 1
                });
                rows[index].1.count += 1;
            }

            rows.sort_by_key(|(rank, _)| *rank);
            debug!("Cross-tabulated {} rows for field '{field}'", rows.len());

            FieldCrossTab {
                field: field.to_string(),
                rows: rows.into_iter().map(|(_, row)| row).collect(),
            }
        })
        .collect()
}
