use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use sfvt::{analyse, positions};

pub fn repo_root() -> Result<PathBuf> {
    // The manifest directory is this crate, a.k.a. "[...]/sfvt/sfvt-tests".
    Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or(anyhow!("No parent directory"))?
        .to_path_buf())
}

/// Runs a subcommand as if called from the repo root.
pub fn run_in_repo_root(args: &str) -> Result<()> {
    env::set_current_dir(repo_root()?)?;

    if args.starts_with("analyse ") {
        let args = analyse::Cli::try_parse_from(args.split_whitespace())?;
        analyse::cli(args)
    } else if args.starts_with("positions ") {
        let args = positions::Cli::try_parse_from(args.split_whitespace())?;
        positions::cli(args)
    } else {
        Err(anyhow!("Unknown subcommand: {args}"))
    }
}

/// Runs the positions subcommand as if called from the repo root and returns the columns.
pub fn resolve_in_repo_root(args: &str) -> Result<Vec<usize>> {
    env::set_current_dir(repo_root()?)?;

    let args = positions::Cli::try_parse_from(args.split_whitespace())?;
    Ok(positions::resolve(args)?.to_vec())
}

/// Reads a csv output file into its rows, including the header.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(repo_root()?.join(path))?;
    reader
        .records()
        .map(|record| Ok(record?.iter().map(ToString::to_string).collect()))
        .collect()
}

pub fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}
