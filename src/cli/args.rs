use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the scry binary.
#[derive(Parser, Debug)]
#[command(
    name = "scry",
    version,
    about = "Structural type inference and scope resolution for ESTree programs"
)]
pub struct CliArgs {
    /// ESTree JSON file (acorn/espree output) to analyse.
    pub input: PathBuf,

    /// Path to a scry.json file. Defaults to scry.json next to the input.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print these top-level symbols. Repeatable.
    #[arg(long = "symbol", value_name = "NAME")]
    pub symbols: Vec<String>,

    /// List completions visible at this source offset.
    #[arg(long = "completions-at", value_name = "OFFSET")]
    pub completions_at: Option<u32>,

    /// Case-insensitive prefix filter for --completions-at.
    #[arg(long, default_value = "", requires = "completions_at")]
    pub prefix: String,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Do not report names that resolve to nothing.
    #[arg(long = "no-report-unresolved")]
    pub no_report_unresolved: bool,

    /// Expressions nested deeper than this infer as `any`.
    #[arg(long = "max-expression-depth", value_name = "DEPTH")]
    pub max_expression_depth: Option<u32>,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

/// How the report is printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
