use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Result, anyhow};
use lib_sfvt::alignment::{AlignedSequence, AlignmentRecord};
use log::debug;
use utf8_chars::BufReadCharsExt;

/// Parses all records of an aligned fasta file.
///
/// Gap characters are kept, whitespace inside sequences is dropped.
pub fn parse_fasta_file(path: impl AsRef<Path>) -> Result<Vec<AlignmentRecord>> {
    let path = path.as_ref();
    debug!("Parsing fasta file {path:?}");

    let file =
        File::open(path).map_err(|error| anyhow!("Unable to open input file {path:?}: {error}"))?;
    let records = parse_fasta(BufReader::new(file))?;

    if records.is_empty() {
        Err(anyhow!("Input file {path:?} contains no fasta record"))
    } else {
        Ok(records)
    }
}

pub fn parse_fasta<Reader: Read>(reader: BufReader<Reader>) -> Result<Vec<AlignmentRecord>> {
    enum State {
        FileStart,
        ParseId,
        ParseComment,
        ParseSequence,
    }

    let mut input = CharacterIterator::new(reader);
    let mut state = State::FileStart;
    let mut current_record = AlignmentRecord::new(String::new(), String::new());
    let mut sequence = String::new();
    let mut records = Vec::new();

    let mut finish_record = |record: &mut AlignmentRecord, sequence: &mut String| {
        record.sequence = AlignedSequence::new(std::mem::take(sequence));
        records.push(std::mem::replace(
            record,
            AlignmentRecord::new(String::new(), String::new()),
        ));
    };

    'parser: loop {
        match state {
            State::FileStart => {
                let mut newline = true;

                'find_first_record: loop {
                    match input.next() {
                        Some(result) => match result? {
                            Character::Newline => newline = true,
                            Character::RecordStart => {
                                if newline {
                                    state = State::ParseId;
                                    break 'find_first_record;
                                } else {
                                    return Err(anyhow!(
                                        "First fasta record is not preceded by a newline character"
                                    ));
                                }
                            }
                            Character::Other(c) => {
                                newline = false;
                                if !c.is_whitespace() {
                                    return Err(anyhow!(
                                        "Found non-whitespace character before first fasta record: {c}"
                                    ));
                                }
                            }
                        },
                        None => break 'parser,
                    }
                }
            }
            State::ParseId => 'collect_id: loop {
                match input.next() {
                    Some(result) => match result? {
                        Character::Newline => {
                            state = State::ParseSequence;
                            break 'collect_id;
                        }
                        Character::RecordStart => current_record.id.push('>'),
                        Character::Other(c) => {
                            if c.is_whitespace() {
                                state = State::ParseComment;
                                break 'collect_id;
                            } else {
                                current_record.id.push(c);
                            }
                        }
                    },
                    None => {
                        finish_record(&mut current_record, &mut sequence);
                        break 'parser;
                    }
                }
            },
            State::ParseComment => 'collect_comment: loop {
                match input.next() {
                    Some(result) => match result? {
                        Character::Newline => {
                            state = State::ParseSequence;
                            break 'collect_comment;
                        }
                        Character::RecordStart => current_record.comment.push('>'),
                        Character::Other(c) => current_record.comment.push(c),
                    },
                    None => {
                        finish_record(&mut current_record, &mut sequence);
                        break 'parser;
                    }
                }
            },
            State::ParseSequence => {
                let mut newline = true;

                'collect_sequence: loop {
                    match input.next() {
                        Some(result) => match result? {
                            Character::Newline => newline = true,
                            Character::RecordStart => {
                                if newline {
                                    finish_record(&mut current_record, &mut sequence);
                                    state = State::ParseId;
                                    break 'collect_sequence;
                                } else {
                                    return Err(anyhow!(
                                        "Found '>' inside the sequence of fasta record '{}'",
                                        current_record.id
                                    ));
                                }
                            }
                            Character::Other(c) => {
                                if !c.is_whitespace() {
                                    sequence.push(c);
                                }
                                newline = false;
                            }
                        },
                        None => {
                            finish_record(&mut current_record, &mut sequence);
                            break 'parser;
                        }
                    }
                }
            }
        }
    }

    debug!("Parsed {} fasta records", records.len());
    Ok(records)
}

enum Character {
    Newline,
    RecordStart,
    Other(char),
}

struct CharacterIterator<Reader: Read + ?Sized> {
    reader: BufReader<Reader>,
}

impl<Reader: Read> CharacterIterator<Reader> {
    fn new(reader: BufReader<Reader>) -> Self {
        Self { reader }
    }
}

impl<Reader: Read + ?Sized> Iterator for CharacterIterator<Reader> {
    type Item = Result<Character>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader
            .read_char_raw()
            .map(|result| {
                result.map(|c| {
                    if c == '\n' || c == '\r' {
                        Character::Newline
                    } else if c == '>' {
                        Character::RecordStart
                    } else {
                        Character::Other(c)
                    }
                })
            })
            .map_err(|error| anyhow!("Error reading character from fasta input file: {error}"))
            .transpose()
    }
}
