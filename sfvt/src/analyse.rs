use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use lib_sfvt::{
    metadata::cross_tabulate,
    position::DuplicatePolicy,
    preflight::resolve_positions,
    variant_type::{VariantTypeTable, extract_variant_types},
};
use log::{LevelFilter, debug, info};

use crate::{
    config::AnalysisConfig,
    init_logging,
    input::{CliInput, load_alignment, metadata::read_metadata_file},
};

use output::OutputDirectory;

mod output;

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// Additionally write the log into this file.
    #[clap(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    input: CliInput,

    /// A tab separated file with metadata for each sequence.
    ///
    /// It must contain an `accession` column matching the sequence identifiers of the alignment.
    #[clap(long, short = 'm')]
    metadata_file: Option<PathBuf>,

    /// The amount of most frequent variant types to cross-tabulate against the metadata.
    #[clap(long, short = 't')]
    top: Option<usize>,

    /// The directory to write the output tables into.
    #[clap(long, short = 'o')]
    output_directory: Option<PathBuf>,

    /// A toml file with analysis settings.
    ///
    /// Command line arguments take precedence over the values in this file.
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// Also write intermediate tables, like the variant type of each sequence.
    #[clap(long)]
    debug_tables: bool,
}

impl Cli {
    /// Merges the config file with the command line arguments.
    fn settings(&self) -> Result<AnalysisConfig> {
        let mut config = AnalysisConfig::read_or_default(self.config.as_ref())?;

        if let Some(output_directory) = &self.output_directory {
            config.output_directory = output_directory.clone();
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if let Some(alignment_format) = self.input.alignment_format {
            config.alignment_format = alignment_format;
        }
        config.deduplicate_positions |= self.input.deduplicate;
        config.debug_tables |= self.debug_tables;

        debug!("Analysis settings: {config:?}");
        Ok(config)
    }
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level, cli.log_file.as_deref())?;
    let config = cli.settings()?;

    let alignment = load_alignment(&cli.input.alignment, config.alignment_format)?;
    let reference = alignment.find_reference(&cli.input.reference_identifier);

    let duplicate_policy = if config.deduplicate_positions {
        DuplicatePolicy::Deduplicate
    } else {
        DuplicatePolicy::Preserve
    };
    let report = resolve_positions(&cli.input.positions, duplicate_policy, &reference)?;
    let columns = report
        .into_validated()
        .map_err(|error| anyhow!("Pre-flight check failed: {error}"))?;

    let assignments = extract_variant_types(&alignment, &columns)?;
    let table = VariantTypeTable::count(&assignments);
    info!(
        "Found {} variant types among {} sequences",
        table.len(),
        assignments.len()
    );

    let output = OutputDirectory::create(&config.output_directory)?;
    let alignment_name = cli
        .input
        .alignment
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "alignment".to_string());
    output.write_variant_types("variant_types.csv", table.counts())?;
    output.write_variant_types(&format!("sfvt_{alignment_name}.csv"), table.counts())?;
    if config.debug_tables {
        output.write_accession_index(&assignments)?;
    }

    if let Some(metadata_file) = &cli.metadata_file {
        let metadata = read_metadata_file(metadata_file)?;
        debug!("Metadata columns: {:?}", metadata.columns());

        output.write_joined(&metadata, &metadata.outer_join(&table, &assignments))?;
        for cross_tab in cross_tabulate(&table, &assignments, &metadata, config.top) {
            output.write_cross_tab(&cross_tab)?;
        }
    }

    info!("Analysis complete, results are in {:?}", output.path());
    Ok(())
}
