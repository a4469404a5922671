//! Scope manager: the scope stack mirrored by analysis, plus offset queries.
//!
//! `enter_scope` pushes a child of the current scope; `exit_scope` pops back
//! to the parent and is a no-op at the root. `define` always targets the
//! current scope and replaces an existing symbol of the same name there;
//! outer definitions are untouched.

use crate::globals::seed_globals;
use crate::scopes::{Scope, ScopeArena, ScopeId, ScopeKind, ScopeOptions};
use crate::symbols::{CompletionItem, Symbol, SymbolArena, SymbolId};
use scry_solver::{TypeId, TypeInterner};
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct ScopeManager {
    scopes: ScopeArena,
    symbols: SymbolArena,
    stack: Vec<ScopeId>,
    /// Snapshot taken after seeding, restored by `reset`.
    initial: Option<(ScopeArena, SymbolArena)>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::empty()
    }
}

impl ScopeManager {
    /// A manager whose global scope holds the host globals.
    pub fn new(interner: &TypeInterner) -> Self {
        let mut manager = Self::empty();
        seed_globals(&mut manager, interner);
        manager.initial = Some((manager.scopes.clone(), manager.symbols.clone()));
        manager
    }

    /// A manager with an empty global scope.
    pub fn empty() -> Self {
        ScopeManager {
            scopes: ScopeArena::new(),
            symbols: SymbolArena::new(),
            stack: vec![ScopeId::GLOBAL],
            initial: None,
        }
    }

    /// Restore the state right after construction.
    pub fn reset(&mut self) {
        match &self.initial {
            Some((scopes, symbols)) => {
                self.scopes = scopes.clone();
                self.symbols = symbols.clone();
            }
            None => {
                self.scopes.clear();
                self.symbols = SymbolArena::new();
            }
        }
        self.stack = vec![ScopeId::GLOBAL];
        debug!("scope manager reset");
    }

    // =========================================================================
    // Scope stack
    // =========================================================================

    pub fn global(&self) -> ScopeId {
        ScopeId::GLOBAL
    }

    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    /// Number of scopes on the stack, the global scope included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a new child of the current scope and make it current.
    pub fn enter_scope(&mut self, kind: ScopeKind, options: ScopeOptions) -> ScopeId {
        let parent = self.current();
        let id = self.scopes.alloc(kind, parent, options);
        self.stack.push(id);
        trace!(scope = id.0, parent = parent.0, kind = kind.as_str(), "enter scope");
        id
    }

    /// Pop to the parent scope. At the root this does nothing and returns
    /// the global scope.
    pub fn exit_scope(&mut self) -> ScopeId {
        if self.stack.len() > 1 {
            let left = self.stack.pop();
            trace!(scope = left.map(|s| s.0), "exit scope");
        }
        self.current()
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id)
    }

    /// Every live scope in creation order.
    pub fn all_scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// Define a symbol in the current scope.
    pub fn define(&mut self, symbol: Symbol) -> SymbolId {
        let scope = self.current();
        self.define_in(scope, symbol)
    }

    /// Define a symbol in a specific scope, replacing any same-named symbol
    /// of that scope.
    pub fn define_in(&mut self, scope: ScopeId, symbol: Symbol) -> SymbolId {
        let name = symbol.name.clone();
        let id = self.symbols.alloc(symbol);
        if let Some(target) = self.scopes.get_mut(scope) {
            if let Some(previous) = target.symbols.insert(name.clone(), id) {
                debug!(name = %name, scope = scope.0, previous = previous.0, "redefinition shadows earlier symbol");
            } else {
                trace!(name = %name, scope = scope.0, symbol = id.0, "define symbol");
            }
        }
        id
    }

    /// Define in the nearest enclosing scope that receives `var` declarations.
    pub fn define_hoisted(&mut self, symbol: Symbol) -> SymbolId {
        let target = self
            .scopes
            .chain(self.current())
            .into_iter()
            .find(|&id| self.scopes.get(id).is_some_and(|s| s.kind.is_var_scope()))
            .unwrap_or(ScopeId::GLOBAL);
        self.define_in(target, symbol)
    }

    /// Add a member symbol to an owning (class or module) symbol.
    pub fn add_member(&mut self, owner: SymbolId, member: Symbol) -> SymbolId {
        self.symbols.add_member(owner, member)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id)
    }

    /// Update the type of an existing symbol.
    pub fn set_symbol_type(&mut self, id: SymbolId, type_id: TypeId) {
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.type_id = type_id;
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve `name` from the current scope outward.
    pub fn resolve(&self, name: &str) -> Option<SymbolId> {
        self.resolve_from(self.current(), name)
    }

    pub fn resolve_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let found = self.scopes.resolve_from(scope, name);
        match found {
            Some(id) => trace!(name, symbol = id.0, "resolved"),
            None => trace!(name, "unresolved"),
        }
        found
    }

    /// Look only in the current scope.
    pub fn resolve_in_current(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .get(self.current())?
            .symbols
            .get(name)
            .copied()
    }

    /// Resolve and count the lookup as a reference to the symbol.
    pub fn resolve_and_reference(&mut self, name: &str) -> Option<SymbolId> {
        let id = self.resolve(name)?;
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.references = symbol.references.saturating_add(1);
        }
        Some(id)
    }

    /// The symbol's type, resolving from the current scope.
    pub fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.resolve(name)
            .and_then(|id| self.symbols.get(id))
            .map(|symbol| symbol.type_id)
    }

    // =========================================================================
    // `this`
    // =========================================================================

    /// `this` type seen from the current scope.
    pub fn this_type(&self) -> Option<TypeId> {
        self.this_type_at(self.current())
    }

    pub fn this_type_at(&self, scope: ScopeId) -> Option<TypeId> {
        self.scopes.this_type_at(scope)
    }

    pub fn set_this_type(&mut self, scope: ScopeId, this_type: TypeId) {
        if let Some(scope) = self.scopes.get_mut(scope) {
            scope.this_type = Some(this_type);
        }
    }

    pub fn enclosing_class_symbol(&self) -> Option<SymbolId> {
        self.scopes
            .find_on_chain(self.current(), |scope| scope.class_symbol)
    }

    pub fn enclosing_function_symbol(&self) -> Option<SymbolId> {
        self.scopes
            .find_on_chain(self.current(), |scope| scope.function_symbol)
    }

    // =========================================================================
    // Offset queries
    // =========================================================================

    /// The innermost scope containing `offset`: the smallest range wins,
    /// later (deeper) scopes win ties. Falls back to the global scope.
    pub fn scope_at_offset(&self, offset: u32) -> ScopeId {
        self.scopes
            .iter()
            .filter(|scope| scope.id != ScopeId::GLOBAL && scope.range.contains(offset))
            .min_by(|a, b| {
                a.range
                    .len()
                    .cmp(&b.range.len())
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map_or(ScopeId::GLOBAL, |scope| scope.id)
    }

    /// Symbols visible at `offset`, innermost definition first.
    pub fn visible_symbols_at_offset(&self, offset: u32) -> Vec<SymbolId> {
        self.scopes.visible_symbols(self.scope_at_offset(offset))
    }

    /// Visible symbols whose name starts with `prefix`, ignoring case.
    pub fn symbols_with_prefix_at_offset(&self, offset: u32, prefix: &str) -> Vec<SymbolId> {
        let prefix = prefix.to_lowercase();
        self.visible_symbols_at_offset(offset)
            .into_iter()
            .filter(|&id| {
                self.symbols
                    .get(id)
                    .is_some_and(|symbol| symbol.name.to_lowercase().starts_with(&prefix))
            })
            .collect()
    }

    /// Completion entries for the symbols visible at `offset`.
    pub fn completions_at_offset(
        &self,
        offset: u32,
        prefix: &str,
        interner: &TypeInterner,
    ) -> Vec<CompletionItem> {
        self.symbols_with_prefix_at_offset(offset, prefix)
            .into_iter()
            .filter_map(|id| self.symbols.get(id))
            .map(|symbol| symbol.to_completion_item(interner))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/scope_manager_tests.rs"]
mod tests;
