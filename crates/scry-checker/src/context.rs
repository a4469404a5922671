//! Checker options and analysis results.

use scry_common::Diagnostic;
use scry_common::limits::MAX_EXPR_CHECK_DEPTH;
use scry_solver::ClassId;
use serde::{Deserialize, Serialize};

/// Options that tune the checker.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Record a diagnostic for every identifier that resolves to nothing.
    pub report_unresolved: bool,
    /// Expressions nested deeper than this infer as `any`.
    pub max_expression_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            report_unresolved: true,
            max_expression_depth: MAX_EXPR_CHECK_DEPTH,
        }
    }
}

/// Result of analysing a whole program.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// `false` only when the root node was not a `Program`.
    pub success: bool,
    /// Classes declared in the program, in declaration order.
    pub classes: Vec<ClassInfo>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A class found during analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    #[serde(skip)]
    pub id: ClassId,
    pub super_class: Option<String>,
    pub members: Vec<ClassMemberInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMemberInfo {
    pub name: String,
    /// Display form of the member type.
    #[serde(rename = "type")]
    pub type_text: String,
    pub is_static: bool,
}
