//! Syntax tree boundary.
//!
//! The inference engine does not parse source text. It consumes an
//! ESTree-shaped tree, typically produced by an external JavaScript parser
//! (acorn, espree) and handed over as JSON. Node types the engine does not
//! model deserialize to [`Node::Unknown`] and infer as `any`.

pub mod node;
pub mod syntax_kind;

pub use node::*;
pub use syntax_kind::SyntaxKind;

/// Parse an ESTree JSON document into a node tree.
pub fn from_json_str(text: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(text)
}

/// Convert an already-parsed JSON value into a node tree.
pub fn from_json_value(value: serde_json::Value) -> Result<Node, serde_json::Error> {
    serde_json::from_value(value)
}
