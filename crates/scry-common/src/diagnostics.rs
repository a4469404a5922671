//! Diagnostic records.
//!
//! The inference core never produces user-facing errors itself; the checker
//! wrapper records informational diagnostics (e.g. unresolved names) that the
//! editor may choose to surface.

use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic attached to a source span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    #[must_use]
    pub const fn new(
        start: u32,
        length: u32,
        message: String,
        category: DiagnosticCategory,
        code: u32,
    ) -> Self {
        Self {
            start,
            length,
            message_text: message,
            category,
            code,
        }
    }

    /// Build a diagnostic from a registered message and its arguments.
    #[must_use]
    pub fn from_message(message: &DiagnosticMessage, start: u32, length: u32, args: &[&str]) -> Self {
        Self::new(
            start,
            length,
            format_message(message.message, args),
            message.category,
            message.code,
        )
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage};

    pub const CANNOT_FIND_NAME: DiagnosticMessage = DiagnosticMessage {
        code: 2304,
        category: DiagnosticCategory::Warning,
        message: "Cannot find name '{0}'.",
    };

    pub const PROPERTY_DOES_NOT_EXIST: DiagnosticMessage = DiagnosticMessage {
        code: 2339,
        category: DiagnosticCategory::Suggestion,
        message: "Property '{0}' does not exist on type '{1}'.",
    };

    pub const CANNOT_FIND_BASE_CLASS: DiagnosticMessage = DiagnosticMessage {
        code: 2689,
        category: DiagnosticCategory::Warning,
        message: "Cannot extend '{0}': it is not a known class.",
    };

    pub const ROOT_IS_NOT_A_PROGRAM: DiagnosticMessage = DiagnosticMessage {
        code: 1000,
        category: DiagnosticCategory::Error,
        message: "Expected a Program node at the root, found '{0}'.",
    };
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
