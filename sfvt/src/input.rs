use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use lib_sfvt::alignment::Alignment;
use log::info;
use serde::Deserialize;

use crate::input::{clustal::parse_clustal_file, fasta::parse_fasta_file};

pub mod clustal;
pub mod fasta;
pub mod metadata;


/// The file format of the multiple sequence alignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentFormat {
    #[default]
    Clustal,
    Fasta,
}

/// The arguments shared by all subcommands that resolve positions.
#[derive(Args)]
pub struct CliInput {
    /// The path to the multiple sequence alignment.
    #[clap(long, short = 'a')]
    pub alignment: PathBuf,

    /// The format of the alignment file.
    ///
    /// Overrides the format given in the configuration file.
    #[clap(long, short = 'f')]
    pub alignment_format: Option<AlignmentFormat>,

    /// The identifier of the reference sequence, e.g. an accession like AB01223.
    ///
    /// The sequence whose identifier contains this string is used as reference.
    /// If multiple sequences match, the last one is used.
    #[clap(long, short = 'r')]
    pub reference_identifier: String,

    /// The positions of the sequence feature in the ungapped reference sequence.
    ///
    /// Comma separated, dashes for inclusive ranges, e.g. '100-110,120,130'.
    #[clap(long, short = 'p')]
    pub positions: String,

    /// Keep each position only once if the positions repeat.
    #[clap(long)]
    pub deduplicate: bool,
}

pub fn load_alignment(path: impl AsRef<Path>, format: AlignmentFormat) -> Result<Alignment> {
    let path = path.as_ref();
    info!("Loading {format:?} alignment {path:?}");

    let records = match format {
        AlignmentFormat::Clustal => parse_clustal_file(path)?,
        AlignmentFormat::Fasta => parse_fasta_file(path)?,
    };
    Ok(Alignment::new(records)?)
}
