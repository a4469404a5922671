//! Runs the checker over one ESTree document and gathers a report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use scry_binder::CompletionItem;
use scry_checker::{CheckerOptions, ClassInfo, TypeChecker};
use scry_common::Diagnostic;
use scry_solver::TypeInterner;

/// What the caller wants out of a run beyond the analysis itself.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Restrict the symbol listing to these names. Empty lists every
    /// top-level declaration.
    pub symbols: Vec<String>,
    pub completions_at: Option<u32>,
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolReport {
    pub name: String,
    /// `None` when a requested name is not declared at the top level.
    #[serde(rename = "type")]
    pub type_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub success: bool,
    pub symbols: Vec<SymbolReport>,
    pub classes: Vec<ClassInfo>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completions: Option<Vec<CompletionItem>>,
}

#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn analyze_source(source: &str, options: &CheckerOptions, request: &Request) -> Result<Report> {
    let root = scry_ast::from_json_str(source).context("input is not a valid ESTree JSON document")?;

    let interner = TypeInterner::new();
    let mut checker = TypeChecker::with_options(&interner, options.clone());
    let result = checker.analyze(&root);

    let symbols: Vec<SymbolReport> = if request.symbols.is_empty() {
        checker
            .top_level_symbols()
            .into_iter()
            .map(|(name, type_id)| SymbolReport {
                name,
                type_text: Some(checker.display(type_id)),
            })
            .collect()
    } else {
        request
            .symbols
            .iter()
            .map(|name| SymbolReport {
                name: name.clone(),
                type_text: checker.symbol_type(name).map(|type_id| checker.display(type_id)),
            })
            .collect()
    };

    let completions = request
        .completions_at
        .map(|offset| checker.completions_at_offset(offset, &request.prefix));

    tracing::debug!(
        success = result.success,
        symbols = symbols.len(),
        diagnostics = result.diagnostics.len(),
        "analysis finished"
    );

    Ok(Report {
        success: result.success,
        symbols,
        classes: result.classes,
        diagnostics: result.diagnostics,
        completions,
    })
}

pub fn analyze_file(path: &Path, options: &CheckerOptions, request: &Request) -> Result<Report> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;
    analyze_source(&source, options, request)
        .with_context(|| format!("failed to analyse {}", path.display()))
}
