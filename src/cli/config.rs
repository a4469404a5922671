use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use super::args::{CliArgs, OutputFormat};
use scry_checker::CheckerOptions;

/// File name looked up next to the input when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "scry.json";

/// Custom deserializer for boolean options that accepts both bool and string values.
/// This handles cases where config files use `"true"` or `"false"` strings.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                    s
                ))),
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScryConfig {
    #[serde(default)]
    pub checker: Option<CheckerSection>,
    #[serde(default)]
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckerSection {
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub report_unresolved: Option<bool>,
    #[serde(default)]
    pub max_expression_depth: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutputSection {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub color: Option<bool>,
}

/// Options after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub checker: CheckerOptions,
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ResolvedOptions {
            checker: CheckerOptions::default(),
            format: OutputFormat::Text,
            color: true,
        }
    }
}

pub fn resolve_options(config: &ScryConfig) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions::default();

    if let Some(checker) = &config.checker {
        if let Some(report_unresolved) = checker.report_unresolved {
            resolved.checker.report_unresolved = report_unresolved;
        }
        if let Some(depth) = checker.max_expression_depth {
            if depth == 0 {
                bail!("checker.maxExpressionDepth must be at least 1");
            }
            resolved.checker.max_expression_depth = depth;
        }
    }

    if let Some(output) = &config.output {
        if let Some(format) = output.format.as_deref() {
            resolved.format = parse_output_format(format)?;
        }
        if let Some(color) = output.color {
            resolved.color = color;
        }
    }

    Ok(resolved)
}

/// Command-line flags win over file values.
pub fn apply_args(mut resolved: ResolvedOptions, args: &CliArgs) -> Result<ResolvedOptions> {
    if args.no_report_unresolved {
        resolved.checker.report_unresolved = false;
    }
    if let Some(depth) = args.max_expression_depth {
        if depth == 0 {
            bail!("--max-expression-depth must be at least 1");
        }
        resolved.checker.max_expression_depth = depth;
    }
    if let Some(format) = args.format {
        resolved.format = format;
    }
    if args.no_color {
        resolved.color = false;
    }
    Ok(resolved)
}

fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => bail!("unsupported output.format '{}'", value),
    }
}

pub fn parse_config(source: &str) -> Result<ScryConfig> {
    let config =
        serde_json::from_str(&normalize_jsonc(source)).context("failed to parse scry.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<ScryConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// The config that applies to `input`: the explicit path if given, else a
/// `scry.json` beside the input when one exists.
pub fn find_config(input: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let dir = match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load and merge everything that configures a run.
pub fn resolve_for_args(args: &CliArgs) -> Result<ResolvedOptions> {
    let resolved = match find_config(&args.input, args.config.as_deref()) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let config = load_config(&path)?;
            resolve_options(&config)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => ResolvedOptions::default(),
    };
    apply_args(resolved, args)
}

/// Lexer state while reading `scry.json`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Lex {
    Json,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Rewrite `scry.json` text as strict JSON in one pass. Comments are dropped
/// (newlines kept so serde's line numbers still match) and a comma whose
/// next significant character closes an object or array is blanked out.
/// String contents are copied verbatim.
fn normalize_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut lex = Lex::Json;
    // Byte offset in `out` of a comma not yet followed by a value.
    let mut open_comma: Option<usize> = None;

    while let Some(ch) = chars.next() {
        match lex {
            Lex::Str => {
                out.push(ch);
                lex = match ch {
                    '\\' => Lex::StrEscape,
                    '"' => Lex::Json,
                    _ => Lex::Str,
                };
            }
            Lex::StrEscape => {
                out.push(ch);
                lex = Lex::Str;
            }
            Lex::LineComment => {
                if ch == '\n' {
                    out.push(ch);
                    lex = Lex::Json;
                }
            }
            Lex::BlockComment => {
                if ch == '*' && chars.next_if_eq(&'/').is_some() {
                    lex = Lex::Json;
                } else if ch == '\n' {
                    out.push(ch);
                }
            }
            Lex::Json => match ch {
                '/' if chars.next_if_eq(&'/').is_some() => lex = Lex::LineComment,
                '/' if chars.next_if_eq(&'*').is_some() => lex = Lex::BlockComment,
                '}' | ']' => {
                    if let Some(at) = open_comma.take() {
                        out.replace_range(at..at + 1, " ");
                    }
                    out.push(ch);
                }
                ',' => {
                    open_comma = Some(out.len());
                    out.push(ch);
                }
                ch if ch.is_whitespace() => out.push(ch),
                _ => {
                    open_comma = None;
                    if ch == '"' {
                        lex = Lex::Str;
                    }
                    out.push(ch);
                }
            },
        }
    }

    out
}
