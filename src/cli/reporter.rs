use colored::Colorize;

use scry_binder::CompletionItem;
use scry_checker::ClassInfo;
use scry_common::{Diagnostic, DiagnosticCategory};

use super::driver::{Report, SymbolReport};

/// Renders a report as human-readable text.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut sections = Vec::new();

        if !report.symbols.is_empty() {
            sections.push(self.section("Symbols", report.symbols.iter().map(|s| self.format_symbol(s))));
        }
        if !report.classes.is_empty() {
            sections.push(self.section(
                "Classes",
                report.classes.iter().map(|class| self.format_class(class)),
            ));
        }
        if !report.diagnostics.is_empty() {
            sections.push(self.section(
                "Diagnostics",
                report.diagnostics.iter().map(|d| self.format_diagnostic(d)),
            ));
        }
        if let Some(completions) = &report.completions {
            sections.push(self.section(
                "Completions",
                completions.iter().map(|item| self.format_completion(item)),
            ));
        }

        if !report.success {
            sections.push(self.paint_error("analysis failed"));
        }

        sections.join("\n\n")
    }

    fn section(&self, title: &str, lines: impl Iterator<Item = String>) -> String {
        let heading = if self.color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        let mut out = heading;
        for line in lines {
            out.push('\n');
            out.push_str(&line);
        }
        out
    }

    pub fn format_symbol(&self, symbol: &SymbolReport) -> String {
        match &symbol.type_text {
            Some(type_text) => format!("  {}: {}", symbol.name, self.paint_type(type_text)),
            None => format!("  {}: {}", symbol.name, self.dim("<not declared>")),
        }
    }

    fn format_class(&self, class: &ClassInfo) -> String {
        let mut out = match &class.super_class {
            Some(base) => format!("  {} extends {}", class.name, base),
            None => format!("  {}", class.name),
        };
        for member in &class.members {
            out.push('\n');
            let prefix = if member.is_static { "static " } else { "" };
            out.push_str(&format!(
                "    {}{}: {}",
                prefix,
                member.name,
                self.paint_type(&member.type_text)
            ));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = format!("{}..{}", diagnostic.start, diagnostic.start + diagnostic.length);
        format!(
            "  {} - {} {}: {}",
            self.dim(&location),
            self.format_category(diagnostic.category),
            self.format_code(diagnostic.code),
            diagnostic.message_text
        )
    }

    fn format_completion(&self, item: &CompletionItem) -> String {
        let mut out = format!("  {} ({})", item.label, item.kind.as_str());
        if !item.detail.is_empty() {
            out.push_str(": ");
            out.push_str(&self.paint_type(&item.detail));
        }
        out
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("SC{}", code);
        if self.color {
            label.bright_black().to_string()
        } else {
            label
        }
    }

    fn paint_type(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}
