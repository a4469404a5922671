//! Common types and utilities for the scry inference engine.
//!
//! This crate provides foundational types used across all scry crates:
//! - String interning (`Atom`, `Interner`)
//! - Source ranges (`TextRange`) for offset- and line-based containment
//! - Engine limits and thresholds
//! - Diagnostic records produced by the checker

// String interning for identifier and property-name deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Source ranges
pub mod span;
pub use span::TextRange;

// Centralized limits and thresholds
pub mod limits;

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};
