use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Result, anyhow, ensure};
use lib_sfvt::alignment::{AlignedSequence, AlignmentRecord};
use log::{debug, trace};

/// Headers written by programs that produce clustal formatted alignments.
const HEADERS: [&str; 3] = ["CLUSTAL", "MUSCLE", "PROBCONS"];

pub fn parse_clustal_file(path: impl AsRef<Path>) -> Result<Vec<AlignmentRecord>> {
    let path = path.as_ref();
    debug!("Parsing clustal file {path:?}");

    let file =
        File::open(path).map_err(|error| anyhow!("Unable to open input file {path:?}: {error}"))?;
    parse_clustal(BufReader::new(file))
        .map_err(|error| anyhow!("Unable to parse clustal file {path:?}: {error}"))
}

/// Parses an interleaved clustal alignment.
///
/// Consensus lines (starting with whitespace) and trailing residue counts are ignored.
pub fn parse_clustal(reader: impl BufRead) -> Result<Vec<AlignmentRecord>> {
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(anyhow!("Input contains no clustal header")),
        }
    };
    ensure!(
        HEADERS.iter().any(|prefix| header.starts_with(prefix)),
        "Expected a clustal header, but found: {header}"
    );
    trace!("Clustal header: {header}");

    let mut sequences: Vec<(String, String)> = Vec::new();
    let mut index_by_id = HashMap::new();

    for (line_index, line) in lines {
        let line = line?;
        if line.trim().is_empty() || line.starts_with(char::is_whitespace) {
            continue;
        }

        let mut columns = line.split_whitespace();
        let (Some(id), Some(block)) = (columns.next(), columns.next()) else {
            return Err(anyhow!(
                "Line {} has an identifier but no sequence: {line}",
                line_index + 1
            ));
        };
        if let Some(count) = columns.next() {
            ensure!(
                count.parse::<usize>().is_ok() && columns.next().is_none(),
                "Line {} has unexpected content after the sequence: {line}",
                line_index + 1
            );
        }

        let index = *index_by_id.entry(id.to_string()).or_insert_with(|| {
            sequences.push((id.to_string(), String::new()));
            sequences.len() - 1
        });
        sequences[index].1.push_str(block);
    }

    ensure!(!sequences.is_empty(), "Clustal alignment contains no sequences");
    debug!("Parsed {} clustal records", sequences.len());

    Ok(sequences
        .into_iter()
        .map(|(id, sequence)| AlignmentRecord {
            id,
            comment: String::new(),
            sequence: AlignedSequence::new(sequence),
        })
        .collect())
}
