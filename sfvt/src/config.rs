use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use log::debug;
use serde::Deserialize;

use crate::input::AlignmentFormat;

#[cfg(test)]
mod tests;

/// Settings of an analysis run that can be given in a toml file.
///
/// Command line arguments take precedence over values from the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// The directory in which all output tables are written.
    pub output_directory: PathBuf,

    /// The amount of most frequent variant types that are cross-tabulated against metadata.
    pub top: usize,

    pub alignment_format: AlignmentFormat,

    pub deduplicate_positions: bool,

    /// Also write intermediate tables.
    pub debug_tables: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("output"),
            top: 10,
            alignment_format: AlignmentFormat::Clustal,
            deduplicate_positions: false,
            debug_tables: false,
        }
    }
}

impl AnalysisConfig {
    /// Reads the config file, or returns the default config if no path is given.
    pub fn read_or_default(path: Option<impl AsRef<Path>>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::default()),
        }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading config file {path:?}");

        let mut config = String::new();
        BufReader::new(
            File::open(path)
                .map_err(|error| anyhow!("Unable to open config file {path:?}: {error}"))?,
        )
        .read_to_string(&mut config)
        .map_err(|error| anyhow!("Unable to read config file {path:?}: {error}"))?;

        Self::parse(&config).map_err(|error| anyhow!("Unable to parse config file {path:?}: {error}"))
    }

    pub fn parse(config: &str) -> Result<Self> {
        Ok(toml::from_str(config)?)
    }
}
