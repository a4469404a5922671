//! Incremental symbol table for editor use.
//!
//! Same scope tree as [`ScopeManager`](crate::ScopeManager), but scope spans
//! are inclusive line ranges and a line index maps start lines to scopes, so
//! an edit can drop exactly the scopes it touched and the rest of the tree
//! stays addressable.
//!
//! Invalidation rule: every non-global scope overlapping the edited lines is
//! removed with its subtree, except scopes that strictly enclose the edit.
//! When the edit touches no other scope, the innermost enclosing scope is
//! removed instead, since the edit rewrites its body.

use crate::scopes::{Scope, ScopeArena, ScopeId, ScopeKind, ScopeOptions};
use crate::symbols::{CompletionItem, Symbol, SymbolArena, SymbolId};
use scry_common::TextRange;
use scry_solver::TypeInterner;
use std::collections::BTreeMap;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct SymbolTable {
    scopes: ScopeArena,
    symbols: SymbolArena,
    stack: Vec<ScopeId>,
    /// Start line to the scopes starting there, in creation order.
    line_index: BTreeMap<u32, Vec<ScopeId>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: ScopeArena::new(),
            symbols: SymbolArena::new(),
            stack: vec![ScopeId::GLOBAL],
            line_index: BTreeMap::new(),
        }
    }

    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::GLOBAL)
    }

    /// Enter a scope spanning `start_line..=end_line`.
    pub fn enter_scope(&mut self, kind: ScopeKind, start_line: u32, end_line: u32) -> ScopeId {
        let range = TextRange::new(start_line, end_line.max(start_line));
        let id = self
            .scopes
            .alloc(kind, self.current(), ScopeOptions::with_range(range));
        self.line_index.entry(range.start).or_default().push(id);
        self.stack.push(id);
        trace!(scope = id.0, start_line, end_line, kind = kind.as_str(), "enter scope");
        id
    }

    pub fn exit_scope(&mut self) -> ScopeId {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    pub fn define(&mut self, symbol: Symbol) -> SymbolId {
        let scope = self.current();
        let name = symbol.name.clone();
        let id = self.symbols.alloc(symbol);
        if let Some(scope) = self.scopes.get_mut(scope) {
            scope.symbols.insert(name, id);
        }
        id
    }

    pub fn resolve(&self, name: &str) -> Option<SymbolId> {
        self.scopes.resolve_from(self.current(), name)
    }

    pub fn resolve_at_line(&self, line: u32, name: &str) -> Option<SymbolId> {
        self.scopes.resolve_from(self.scope_at_line(line), name)
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Number of live scopes, the global scope included.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// The innermost scope whose span contains `line`. Among equal spans the
    /// later scope wins.
    pub fn scope_at_line(&self, line: u32) -> ScopeId {
        self.line_index
            .range(..=line)
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter_map(|id| self.scopes.get(id))
            .filter(|scope| scope.range.contains_line(line))
            .min_by(|a, b| {
                a.range
                    .len()
                    .cmp(&b.range.len())
                    .then_with(|| b.id.cmp(&a.id))
            })
            .map_or(ScopeId::GLOBAL, |scope| scope.id)
    }

    pub fn visible_symbols_at_line(&self, line: u32) -> Vec<SymbolId> {
        self.scopes.visible_symbols(self.scope_at_line(line))
    }

    /// Completion entries visible at `line` whose label starts with
    /// `prefix`, ignoring case.
    pub fn completions_at_line(
        &self,
        line: u32,
        prefix: &str,
        interner: &TypeInterner,
    ) -> Vec<CompletionItem> {
        let prefix = prefix.to_lowercase();
        self.visible_symbols_at_line(line)
            .into_iter()
            .filter_map(|id| self.symbols.get(id))
            .filter(|symbol| symbol.name.to_lowercase().starts_with(&prefix))
            .map(|symbol| symbol.to_completion_item(interner))
            .collect()
    }

    /// Drop the scopes touched by an edit of `start_line..=end_line`.
    /// Returns every removed scope id.
    pub fn invalidate_range(&mut self, start_line: u32, end_line: u32) -> Vec<ScopeId> {
        let (start_line, end_line) = (start_line.min(end_line), start_line.max(end_line));

        let mut targets = Vec::new();
        let mut innermost_enclosing: Option<&Scope> = None;
        for scope in self.scopes.iter() {
            if scope.id == ScopeId::GLOBAL || !scope.range.overlaps_lines(start_line, end_line) {
                continue;
            }
            let encloses = scope.range.start < start_line && end_line < scope.range.end;
            if !encloses {
                targets.push(scope.id);
            } else if innermost_enclosing.is_none_or(|inner| scope.range.len() <= inner.range.len()) {
                innermost_enclosing = Some(scope);
            }
        }
        if targets.is_empty()
            && let Some(scope) = innermost_enclosing
        {
            targets.push(scope.id);
        }

        let mut removed = Vec::new();
        for target in targets {
            removed.extend(self.scopes.remove_subtree(target));
        }
        if removed.is_empty() {
            return removed;
        }

        for ids in self.line_index.values_mut() {
            ids.retain(|id| !removed.contains(id));
        }
        self.line_index.retain(|&line, ids| {
            !ids.is_empty() && !(start_line..=end_line).contains(&line)
        });
        if let Some(position) = self.stack.iter().position(|id| removed.contains(id)) {
            self.stack.truncate(position.max(1));
        }

        debug!(start_line, end_line, removed = removed.len(), "invalidated scopes");
        removed
    }

    /// Move scopes after an edit by `delta` lines. Scopes starting at or
    /// after `from_line` move entirely; scopes that start before it and
    /// reach it grow or shrink at their end.
    pub fn shift_lines(&mut self, from_line: u32, delta: i64) {
        if delta == 0 {
            return;
        }
        let shift = |line: u32| -> u32 {
            (i64::from(line) + delta).clamp(0, i64::from(u32::MAX - 1)) as u32
        };

        let ids: Vec<ScopeId> = self
            .scopes
            .iter()
            .filter(|scope| scope.id != ScopeId::GLOBAL)
            .map(|scope| scope.id)
            .collect();
        for id in ids {
            let Some(scope) = self.scopes.get_mut(id) else {
                continue;
            };
            if scope.range.start >= from_line {
                scope.range.start = shift(scope.range.start);
                scope.range.end = shift(scope.range.end);
            } else if scope.range.end >= from_line {
                scope.range.end = shift(scope.range.end).max(scope.range.start);
            }
        }
        self.rebuild_index();
        trace!(from_line, delta, "shifted scopes");
    }

    fn rebuild_index(&mut self) {
        self.line_index.clear();
        for scope in self.scopes.iter() {
            if scope.id != ScopeId::GLOBAL {
                self.line_index
                    .entry(scope.range.start)
                    .or_default()
                    .push(scope.id);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/symbol_table_tests.rs"]
mod tests;
