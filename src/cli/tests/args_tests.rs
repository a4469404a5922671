use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["scry", "program.json"]).expect("default args should parse");

    assert_eq!(args.input, PathBuf::from("program.json"));
    assert!(args.config.is_none());
    assert!(args.symbols.is_empty());
    assert_eq!(args.completions_at, None);
    assert_eq!(args.prefix, "");
    assert_eq!(args.format, None);
    assert!(!args.no_report_unresolved);
    assert!(!args.no_color);
}

#[test]
fn parses_repeated_symbols_and_completion_flags() {
    let args = CliArgs::try_parse_from([
        "scry",
        "program.json",
        "--symbol",
        "total",
        "--symbol",
        "Dog",
        "--completions-at",
        "42",
        "--prefix",
        "to",
        "--format",
        "json",
        "--config",
        "configs/scry.json",
    ])
    .expect("flags should parse");

    assert_eq!(args.symbols, vec!["total".to_string(), "Dog".to_string()]);
    assert_eq!(args.completions_at, Some(42));
    assert_eq!(args.prefix, "to");
    assert_eq!(args.format, Some(OutputFormat::Json));
    assert_eq!(args.config, Some(PathBuf::from("configs/scry.json")));
}

#[test]
fn requires_an_input_file() {
    assert!(CliArgs::try_parse_from(["scry"]).is_err());
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["scry", "a.json", "--format", "yaml"]).is_err());
}

#[test]
fn prefix_requires_completion_offset() {
    assert!(CliArgs::try_parse_from(["scry", "a.json", "--prefix", "x"]).is_err());
}
