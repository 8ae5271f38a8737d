use std::path::PathBuf;

use crate::input::AlignmentFormat;

use super::AnalysisConfig;

#[test]
fn empty_config_is_default() {
    assert_eq!(AnalysisConfig::parse("").unwrap(), AnalysisConfig::default());
}

#[test]
fn partial_config_keeps_defaults() {
    let config = AnalysisConfig::parse(
        r#"
        output_directory = "results"
        alignment_format = "fasta"
        "#,
    )
    .unwrap();

    assert_eq!(config.output_directory, PathBuf::from("results"));
    assert_eq!(config.alignment_format, AlignmentFormat::Fasta);
    assert_eq!(config.top, 10);
    assert!(!config.deduplicate_positions);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(AnalysisConfig::parse("colour = \"blue\"").is_err());
}

#[test]
fn missing_file_fails() {
    assert!(AnalysisConfig::read("does/not/exist.toml").is_err());
    assert_eq!(
        AnalysisConfig::read_or_default(None::<PathBuf>).unwrap(),
        AnalysisConfig::default()
    );
}
