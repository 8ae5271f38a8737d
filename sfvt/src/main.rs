use clap::Parser;
use sfvt::{analyse, positions};

/// Sequence feature variant type analysis of multiple sequence alignments.
#[derive(Parser)]
#[command(version, about)]
enum Cli {
    /// Assign variant types to all sequences and count them.
    Analyse(analyse::Cli),
    /// Only translate reference positions into alignment columns and validate them.
    Positions(positions::Cli),
}

fn main() -> anyhow::Result<()> {
    match Cli::parse() {
        Cli::Analyse(cli) => analyse::cli(cli),
        Cli::Positions(cli) => positions::cli(cli),
    }
}
