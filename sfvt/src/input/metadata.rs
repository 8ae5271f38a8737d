use std::path::Path;

use anyhow::{Result, anyhow};
use lib_sfvt::metadata::MetadataTable;
use log::debug;

/// Reads a tab separated metadata file with a header line.
pub fn read_metadata_file(path: impl AsRef<Path>) -> Result<MetadataTable> {
    let path = path.as_ref();
    debug!("Reading metadata file {path:?}");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|error| anyhow!("Unable to open metadata file {path:?}: {error}"))?;

    let columns = reader
        .headers()
        .map_err(|error| anyhow!("Unable to read metadata header of {path:?}: {error}"))?
        .iter()
        .map(|column| column.trim().to_string())
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(|field| field.trim().to_string()).collect())
                .map_err(|error| anyhow!("Unable to read metadata row of {path:?}: {error}"))
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok(MetadataTable::new(columns, rows)?)
}
