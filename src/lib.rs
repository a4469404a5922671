//! scry: structural type inference and scope resolution for ESTree programs.
//!
//! The engine is split across workspace crates and re-exported here:
//! - `common`: interned strings, ranges, limits and diagnostics
//! - `ast`: the ESTree node model deserialised from parser JSON
//! - `solver`: the type interner, relations, substitution and inference
//! - `binder`: symbols, the scope manager and the line-indexed symbol table
//! - `checker`: the walker that binds a program and infers its types
//!
//! This crate adds the command-line driver and tracing setup.

pub use scry_ast as ast;
pub use scry_binder as binder;
pub use scry_checker as checker;
pub use scry_common as common;
pub use scry_solver as solver;

pub use scry_checker::{AnalysisResult, CheckerOptions, TypeChecker};
pub use scry_solver::{TypeId, TypeInterner};

// Command-line argument parsing, config loading and reporting
pub mod cli;

// Subscriber setup controlled by SCRY_LOG / SCRY_LOG_FORMAT
pub mod tracing_config;
