use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use lib_sfvt::{
    position::DuplicatePolicy,
    preflight::{RuleStatus, resolve_positions},
    validation::ValidatedPositionSet,
};
use log::LevelFilter;

use crate::{
    config::AnalysisConfig,
    init_logging,
    input::{CliInput, load_alignment},
};

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "warn")]
    log_level: LevelFilter,

    #[command(flatten)]
    input: CliInput,

    /// A toml file with analysis settings.
    ///
    /// Only the alignment format and the duplicate handling are used.
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,
}

/// Resolves the positions against the reference and prints the resulting alignment columns.
pub fn cli(cli: Cli) -> Result<()> {
    let columns = resolve(cli)?;
    println!(
        "Columns: {}",
        columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    );

    Ok(())
}

/// Prints the outcome of every pre-flight rule and returns the validated columns.
pub fn resolve(cli: Cli) -> Result<ValidatedPositionSet> {
    init_logging(cli.log_level, None)?;
    let config = AnalysisConfig::read_or_default(cli.config.as_ref())?;

    let alignment = load_alignment(
        &cli.input.alignment,
        cli.input.alignment_format.unwrap_or(config.alignment_format),
    )?;
    let reference = alignment.find_reference(&cli.input.reference_identifier);
    let duplicate_policy = if cli.input.deduplicate || config.deduplicate_positions {
        DuplicatePolicy::Deduplicate
    } else {
        DuplicatePolicy::Preserve
    };

    let report = resolve_positions(&cli.input.positions, duplicate_policy, &reference)?;
    for outcome in &report.outcomes {
        let status = match &outcome.status {
            RuleStatus::Passed => "passed".to_string(),
            RuleStatus::Failed(error) => format!("failed: {error}"),
            RuleStatus::NotEvaluated => "not evaluated".to_string(),
        };
        println!("{}: {status}", outcome.rule);
    }

    report
        .into_validated()
        .map_err(|error| anyhow!("Pre-flight check failed: {error}"))
}
