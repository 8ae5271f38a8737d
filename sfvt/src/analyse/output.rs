use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use lib_sfvt::{
    metadata::{FieldCrossTab, JoinedRow, MetadataTable},
    variant_type::{VariantAssignment, VariantTypeCount},
};
use log::info;
use serde::Serialize;

/// Writes the tables of an analysis run into a directory.
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    /// Creates the directory if it does not exist.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)
            .map_err(|error| anyhow!("Unable to create output directory {path:?}: {error}"))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_variant_types(&self, file_name: &str, counts: &[VariantTypeCount]) -> Result<()> {
        self.write_serialized(file_name, counts)
    }

    pub fn write_accession_index(&self, assignments: &[VariantAssignment]) -> Result<()> {
        self.write_serialized("accession_index.csv", assignments)
    }

    pub fn write_joined(&self, metadata: &MetadataTable, joined: &[JoinedRow]) -> Result<()> {
        let mut header = vec!["accession", "variant_type", "variant_type_id"];
        header.extend(metadata.fields().map(|(_, field)| field));

        self.write_records("all_data_with_variant_type.csv", &header, |writer| {
            for row in joined {
                writer.write_record(
                    [&row.accession, &row.variant_type, &row.variant_type_id]
                        .into_iter()
                        .chain(&row.fields),
                )?;
            }
            Ok(())
        })
    }

    pub fn write_cross_tab(&self, cross_tab: &FieldCrossTab) -> Result<()> {
        let file_name = format!("sfvt_by_{}.csv", file_name_component(&cross_tab.field));
        let header = ["variant_type_id", cross_tab.field.as_str(), "count"];

        self.write_records(&file_name, &header, |writer| {
            for row in &cross_tab.rows {
                writer.write_record([
                    row.variant_type_id.as_str(),
                    row.value.as_str(),
                    row.count.to_string().as_str(),
                ])?;
            }
            Ok(())
        })
    }

    fn write_serialized<Row: Serialize>(&self, file_name: &str, rows: &[Row]) -> Result<()> {
        let path = self.path.join(file_name);
        info!("Writing {path:?}");

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|error| anyhow!("Unable to create output file {path:?}: {error}"))?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_records(
        &self,
        file_name: &str,
        header: &[&str],
        write_rows: impl FnOnce(&mut csv::Writer<File>) -> csv::Result<()>,
    ) -> Result<()> {
        let path = self.path.join(file_name);
        info!("Writing {path:?}");

        let mut writer = csv::Writer::from_path(&path)
            .map_err(|error| anyhow!("Unable to create output file {path:?}: {error}"))?;
        writer.write_record(header)?;
        write_rows(&mut writer)
            .map_err(|error| anyhow!("Unable to write output file {path:?}: {error}"))?;
        writer.flush()?;
        Ok(())
    }
}

/// Replaces characters that are problematic in file names.
fn file_name_component(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::file_name_component;

    #[test]
    fn file_names_are_sanitised() {
        assert_eq!(file_name_component("host"), "host");
        assert_eq!(file_name_component("collection date"), "collection_date");
        assert_eq!(file_name_component("a/b"), "a_b");
    }
}
