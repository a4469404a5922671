//! Type checker for scry.
//!
//! Walks an ESTree program once, binding declarations into a
//! [`scry_binder::ScopeManager`] and inferring a structural type for every
//! expression it meets:
//!
//! - `state`: [`TypeChecker`] and its editor-facing queries
//! - `statements`: declarations, hoisting and destructuring
//! - `return_type`: the return walk shared by programs and function bodies
//! - `function_type`, `class_checker`: callable and class types
//! - `expr`, `call_checker`: expression inference and contextual callbacks
//! - `promise_checker`: `async` results and `await`
//!
//! Inference never fails. Unknown constructs infer as `any`, and unresolved
//! names become diagnostics in the [`AnalysisResult`].

pub mod context;
pub mod return_type;
pub mod state;

mod call_checker;
mod class_checker;
mod expr;
mod function_type;
mod promise_checker;
mod statements;

pub use context::{AnalysisResult, CheckerOptions, ClassInfo, ClassMemberInfo};
pub use return_type::{ExpressionTyper, ReturnAnalysis, analyze_return_type, collect_returns};
pub use state::TypeChecker;

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
