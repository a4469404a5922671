//! Centralized limits and thresholds for the inference engine.
//!
//! The engine is best-effort: when a limit is hit the operation gives up and
//! returns a permissive result (`any`, or the input type unchanged) instead of
//! failing.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum depth for expression type inference.
///
/// Deeply nested expressions beyond this depth infer as `any`.
///
/// ```javascript
/// const x = (((((((1 + 2) + 3) + 4) /* ... 500 levels ... */))));
/// ```
pub const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// Maximum depth for type substitution.
///
/// Substitution past this depth returns the type unchanged.
pub const MAX_INSTANTIATION_DEPTH: u32 = 50;

/// Maximum depth for unifying an expected type against an argument type
/// during generic inference.
pub const MAX_INFERENCE_DEPTH: u32 = 64;

/// Maximum depth for structural relation checks (equality, assignability).
pub const MAX_RELATION_DEPTH: u32 = 100;

// =============================================================================
// Iteration Limits
// =============================================================================

/// Maximum number of parent hops when walking a scope chain.
pub const MAX_SCOPE_WALK_ITERATIONS: usize = 10_000;

/// Maximum number of superclass hops when walking an inheritance chain.
///
/// Inheritance graphs are expected to be acyclic; this only guards against a
/// malformed `extends` loop hanging the engine.
pub const MAX_SUPERCLASS_CHAIN: usize = 256;
