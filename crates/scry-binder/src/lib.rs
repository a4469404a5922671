//! Symbols and lexical scopes for scry.
//!
//! - `symbols`: `Symbol`, `SymbolKind`, the symbol arena and completion items
//! - `scopes`: the scope tree arena shared by both scope owners below
//! - `scope_manager`: the offset-ranged scope stack driven by the checker
//! - `symbol_table`: a line-indexed variant with range invalidation for editors
//! - `globals`: the host environment seeded into every global scope

pub mod globals;
pub mod scope_manager;
pub mod scopes;
pub mod symbol_table;
pub mod symbols;

pub use globals::seed_globals;
pub use scope_manager::ScopeManager;
pub use scopes::{Scope, ScopeArena, ScopeId, ScopeKind, ScopeOptions};
pub use symbol_table::SymbolTable;
pub use symbols::{
    CompletionItem, CompletionKind, DeclarationKind, Symbol, SymbolArena, SymbolFlags, SymbolId,
    SymbolKind, Visibility,
};
