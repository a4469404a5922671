use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use scry::cli::args::{CliArgs, OutputFormat};
use scry::cli::config::resolve_for_args;
use scry::cli::driver::{Request, analyze_file};
use scry::cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
/// The input parsed but its root was not a `Program`.
const EXIT_ANALYSIS_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if SCRY_LOG or RUST_LOG is set (zero cost otherwise).
    scry::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let options = resolve_for_args(&args)?;

    let request = Request {
        symbols: args.symbols.clone(),
        completions_at: args.completions_at,
        prefix: args.prefix.clone(),
    };
    let report = analyze_file(&args.input, &options.checker, &request)?;

    match options.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            let color = options.color && std::io::stdout().is_terminal();
            colored::control::set_override(color);
            let rendered = Reporter::new(color).render(&report);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
    }

    let code = if report.success {
        EXIT_SUCCESS
    } else {
        EXIT_ANALYSIS_FAILED
    };
    std::process::exit(code);
}
