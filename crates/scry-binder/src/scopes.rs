//! Lexical scopes and the scope arena.
//!
//! Scopes form a tree stored in an arena: each scope holds its parent id and
//! an ordered list of child ids. Removing a scope leaves a vacant slot so the
//! ids of surviving scopes never change.

use crate::symbols::SymbolId;
use rustc_hash::FxHashMap;
use scry_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use scry_common::TextRange;
use scry_solver::TypeId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The root scope of every arena.
    pub const GLOBAL: ScopeId = ScopeId(0);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Function,
    Arrow,
    Class,
    Method,
    Block,
    Catch,
    Module,
    With,
}

impl ScopeKind {
    /// Scopes that introduce their own `this` binding. Every other scope
    /// (arrow functions included) sees the `this` of its enclosing scope.
    pub const fn binds_this(self) -> bool {
        matches!(
            self,
            ScopeKind::Global
                | ScopeKind::Function
                | ScopeKind::Class
                | ScopeKind::Method
                | ScopeKind::Module
        )
    }

    /// Scopes that receive `var` declarations and hoisted functions.
    pub const fn is_var_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Global
                | ScopeKind::Function
                | ScopeKind::Arrow
                | ScopeKind::Method
                | ScopeKind::Module
        )
    }

    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            ScopeKind::Function | ScopeKind::Arrow | ScopeKind::Method
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Function => "function",
            ScopeKind::Arrow => "arrow",
            ScopeKind::Class => "class",
            ScopeKind::Method => "method",
            ScopeKind::Block => "block",
            ScopeKind::Catch => "catch",
            ScopeKind::Module => "module",
            ScopeKind::With => "with",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    /// One symbol per name; a redefinition replaces the entry.
    pub symbols: FxHashMap<String, SymbolId>,
    /// Offsets (`[start, end)`) or lines (inclusive), depending on the owner.
    pub range: TextRange,
    pub this_type: Option<TypeId>,
    pub class_symbol: Option<SymbolId>,
    pub function_symbol: Option<SymbolId>,
}

/// Options for entering a scope.
#[derive(Clone, Debug, Default)]
pub struct ScopeOptions {
    pub range: TextRange,
    pub this_type: Option<TypeId>,
    pub class_symbol: Option<SymbolId>,
    pub function_symbol: Option<SymbolId>,
}

impl ScopeOptions {
    pub fn with_range(range: TextRange) -> Self {
        ScopeOptions {
            range,
            ..ScopeOptions::default()
        }
    }

    #[must_use]
    pub fn this_type(mut self, this_type: TypeId) -> Self {
        self.this_type = Some(this_type);
        self
    }

    #[must_use]
    pub fn class_symbol(mut self, symbol: SymbolId) -> Self {
        self.class_symbol = Some(symbol);
        self
    }

    #[must_use]
    pub fn function_symbol(mut self, symbol: SymbolId) -> Self {
        self.function_symbol = Some(symbol);
        self
    }
}

#[derive(Clone, Debug)]
pub struct ScopeArena {
    scopes: Vec<Option<Scope>>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    /// New arena holding only the global scope, with an unbounded range.
    pub fn new() -> Self {
        let global = Scope {
            id: ScopeId::GLOBAL,
            kind: ScopeKind::Global,
            parent: None,
            children: Vec::new(),
            symbols: FxHashMap::default(),
            range: TextRange::unbounded(),
            this_type: None,
            class_symbol: None,
            function_symbol: None,
        };
        ScopeArena {
            scopes: vec![Some(global)],
        }
    }

    /// Allocate a child of `parent`.
    pub fn alloc(&mut self, kind: ScopeKind, parent: ScopeId, options: ScopeOptions) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Some(Scope {
            id,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            symbols: FxHashMap::default(),
            range: options.range,
            this_type: options.this_type,
            class_symbol: options.class_symbol,
            function_symbol: options.function_symbol,
        }));
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: ScopeId) -> bool {
        self.get(id).is_some()
    }

    /// Live scopes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter().filter_map(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids from `scope` up to the global scope.
    pub fn chain(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut chain = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            if chain.len() >= MAX_SCOPE_WALK_ITERATIONS {
                break;
            }
            let Some(scope) = self.get(id) else {
                break;
            };
            chain.push(id);
            current = scope.parent;
        }
        chain
    }

    /// Walk the chain from `scope` and return the first symbol named `name`.
    pub fn resolve_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.chain(scope)
            .into_iter()
            .find_map(|id| self.get(id)?.symbols.get(name).copied())
    }

    /// The `this` type seen from `scope`: the nearest explicit `this_type`,
    /// stopping at the first scope that binds its own `this`.
    pub fn this_type_at(&self, scope: ScopeId) -> Option<TypeId> {
        for id in self.chain(scope) {
            let scope = self.get(id)?;
            if scope.this_type.is_some() {
                return scope.this_type;
            }
            if scope.kind.binds_this() {
                return None;
            }
        }
        None
    }

    /// Every symbol visible from `scope`, innermost definition first,
    /// deduplicated by name.
    pub fn visible_symbols(&self, scope: ScopeId) -> Vec<SymbolId> {
        let mut seen: Vec<&str> = Vec::new();
        let mut result = Vec::new();
        for id in self.chain(scope) {
            let Some(scope) = self.get(id) else {
                break;
            };
            let mut names: Vec<(&String, &SymbolId)> = scope.symbols.iter().collect();
            names.sort_by(|a, b| a.0.cmp(b.0));
            for (name, &symbol) in names {
                if !seen.contains(&name.as_str()) {
                    seen.push(name.as_str());
                    result.push(symbol);
                }
            }
        }
        result
    }

    /// Nearest non-`None` back-reference on the chain.
    pub fn find_on_chain<T>(&self, scope: ScopeId, f: impl Fn(&Scope) -> Option<T>) -> Option<T> {
        self.chain(scope)
            .into_iter()
            .find_map(|id| self.get(id).and_then(&f))
    }

    /// Remove `scope` and its subtree. The scope is first detached from its
    /// parent's child list. The global scope cannot be removed. Returns the
    /// removed ids, root first.
    pub fn remove_subtree(&mut self, scope: ScopeId) -> Vec<ScopeId> {
        if scope == ScopeId::GLOBAL || !self.contains(scope) {
            return Vec::new();
        }
        if let Some(parent) = self.get(scope).and_then(|s| s.parent)
            && let Some(parent) = self.get_mut(parent)
        {
            parent.children.retain(|&child| child != scope);
        }

        let mut removed = Vec::new();
        let mut pending = vec![scope];
        while let Some(id) = pending.pop() {
            let Some(slot) = self.scopes.get_mut(id.0 as usize) else {
                continue;
            };
            if let Some(scope) = slot.take() {
                removed.push(id);
                pending.extend(scope.children.iter().rev().copied());
            }
        }
        removed
    }

    /// Drop every scope except the global one and clear its contents.
    pub fn clear(&mut self) {
        *self = ScopeArena::new();
    }
}

#[cfg(test)]
#[path = "../tests/scopes_tests.rs"]
mod tests;
