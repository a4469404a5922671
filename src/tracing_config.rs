//! Diagnostic tracing for the `scry` binary.
//!
//! Off unless `SCRY_LOG` or `RUST_LOG` names a filter (`SCRY_LOG` wins).
//! `SCRY_LOG_FORMAT` picks the layout: `text`, `tree` (nested spans, good
//! for following the checker into and out of scopes) or `json`. Everything
//! is written to stderr; stdout carries only the report.
//!
//! ```bash
//! SCRY_LOG=scry_solver=trace SCRY_LOG_FORMAT=tree scry program.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => LogFormat::Tree,
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// What to install, decided from the environment before touching the
/// global subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSettings {
    pub filter: String,
    pub format: LogFormat,
}

impl TraceSettings {
    /// `None` when no filter variable is set.
    pub fn from_vars(
        scry_log: Option<String>,
        rust_log: Option<String>,
        format: Option<String>,
    ) -> Option<Self> {
        let filter = scry_log.or(rust_log)?;
        Some(TraceSettings {
            filter,
            format: format.as_deref().map(LogFormat::parse).unwrap_or_default(),
        })
    }

    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            std::env::var("SCRY_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
            std::env::var("SCRY_LOG_FORMAT").ok(),
        )
    }

    fn install(&self) {
        let filter = EnvFilter::builder().parse_lossy(&self.filter);
        let registry = Registry::default().with(filter);
        match self.format {
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init(),
            LogFormat::Tree => registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_writer(std::io::stderr)
                        .with_indent_lines(true)
                        .with_targets(true),
                )
                .init(),
        }
    }
}

/// Install the global subscriber if the environment asks for one.
pub fn init_tracing() {
    if let Some(settings) = TraceSettings::from_env() {
        settings.install();
    }
}
