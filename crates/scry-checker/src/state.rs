//! Checker state and its public surface.
//!
//! `TypeChecker` owns the per-document scope manager and borrows the type
//! interner. Expression inference lives in `expr`, statements and bindings
//! in `statements`, functions in `function_type`, classes in
//! `class_checker`, calls in `call_checker` and `async`/`await` handling in
//! `promise_checker`; all of them extend this type.

use crate::context::{AnalysisResult, CheckerOptions, ClassInfo, ClassMemberInfo};
use crate::return_type::collect_returns;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use scry_ast::Node;
use scry_binder::{CompletionItem, ScopeManager, Symbol, SymbolFlags};
use scry_common::Diagnostic;
use scry_common::TextRange;
use scry_common::diagnostics::diagnostic_messages;
use scry_solver::{ClassId, TypeId, TypeInterner, get_completions};
use tracing::debug;

/// Class whose body is being walked.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClassFrame {
    pub class: ClassId,
    /// `this.x = ...` assignments declare instance members only while the
    /// constructor body is walked.
    pub in_constructor: bool,
}

pub struct TypeChecker<'a> {
    pub(crate) interner: &'a TypeInterner,
    pub(crate) scopes: ScopeManager,
    pub(crate) options: CheckerOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Source classes by name, in declaration order.
    pub(crate) classes: IndexMap<String, ClassId>,
    pub(crate) class_stack: Vec<ClassFrame>,
    /// Payload type to its `Promise<T>` instance type.
    pub(crate) promise_types: FxHashMap<TypeId, TypeId>,
    pub(crate) depth: u32,
}

impl<'a> TypeChecker<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        Self::with_options(interner, CheckerOptions::default())
    }

    pub fn with_options(interner: &'a TypeInterner, options: CheckerOptions) -> Self {
        TypeChecker {
            interner,
            scopes: ScopeManager::new(interner),
            options,
            diagnostics: Vec::new(),
            classes: IndexMap::new(),
            class_stack: Vec::new(),
            promise_types: FxHashMap::default(),
            depth: 0,
        }
    }

    pub fn interner(&self) -> &'a TypeInterner {
        self.interner
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    pub fn scopes(&self) -> &ScopeManager {
        &self.scopes
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drop everything learned from the previous program.
    pub fn reset(&mut self) {
        self.scopes.reset();
        self.diagnostics.clear();
        self.classes.clear();
        self.class_stack.clear();
        self.depth = 0;
    }

    /// Analyse a whole program. Top-level declarations land in the global
    /// scope next to the host globals; nested scopes stay registered for
    /// offset queries.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn analyze(&mut self, root: &Node) -> AnalysisResult {
        self.reset();
        let Node::Program(program) = root else {
            let range = root.range();
            let found = format!("{:?}", root.kind());
            return AnalysisResult {
                success: false,
                classes: Vec::new(),
                diagnostics: vec![Diagnostic::from_message(
                    &diagnostic_messages::ROOT_IS_NOT_A_PROGRAM,
                    range.start,
                    range.len(),
                    &[&found],
                )],
            };
        };

        let interner = self.interner;
        self.hoist_declarations(&program.body);
        // Every top-level statement is bound, even after one that cannot
        // complete, so later declarations still get their types.
        for stmt in &program.body {
            collect_returns(interner, std::slice::from_ref(stmt), self);
        }

        debug!(
            classes = self.classes.len(),
            diagnostics = self.diagnostics.len(),
            "analysis finished"
        );
        AnalysisResult {
            success: true,
            classes: self.class_infos(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    // =========================================================================
    // Editor queries
    // =========================================================================

    /// Type of an expression, resolved against the current scope (the
    /// global scope once `analyze` has returned).
    pub fn infer_expression_type(&mut self, expr: &Node) -> TypeId {
        self.infer(expr)
    }

    pub fn symbol_type(&self, name: &str) -> Option<TypeId> {
        self.scopes.resolve_type(name)
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.scopes.resolve(name).and_then(|id| self.scopes.symbol(id))
    }

    /// The class type (`typeof C`) of a class declared in the program.
    pub fn class_type(&self, name: &str) -> Option<TypeId> {
        self.classes
            .get(name)
            .map(|&class| self.interner.class_type(class))
    }

    pub fn instance_type(&self, name: &str) -> Option<TypeId> {
        self.classes
            .get(name)
            .map(|&class| self.interner.instance_type(class))
    }

    /// Members of `type_id` in completion order.
    pub fn completions(&self, type_id: TypeId) -> Vec<(String, TypeId)> {
        get_completions(self.interner, type_id)
            .into_iter()
            .map(|entry| (self.interner.resolve_atom(entry.name).to_string(), entry.type_id))
            .collect()
    }

    pub fn completions_at_offset(&self, offset: u32, prefix: &str) -> Vec<CompletionItem> {
        self.scopes
            .completions_at_offset(offset, prefix, self.interner)
    }

    /// Symbols the program declared at the top level, in source order.
    pub fn top_level_symbols(&self) -> Vec<(String, TypeId)> {
        let Some(global) = self.scopes.scope(self.scopes.global()) else {
            return Vec::new();
        };
        let mut symbols: Vec<&Symbol> = global
            .symbols
            .values()
            .filter_map(|&id| self.scopes.symbol(id))
            .filter(|symbol| !symbol.flags.contains(SymbolFlags::HOST))
            .collect();
        symbols.sort_by(|a, b| {
            let start = |s: &Symbol| s.declaration.map_or(0, |range| range.start);
            start(a).cmp(&start(b)).then_with(|| a.name.cmp(&b.name))
        });
        symbols
            .into_iter()
            .map(|symbol| (symbol.name.clone(), symbol.type_id))
            .collect()
    }

    pub fn display(&self, type_id: TypeId) -> String {
        self.interner.display(type_id)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    pub(crate) fn report_unresolved(&mut self, name: &str, range: TextRange) {
        if !self.options.report_unresolved {
            return;
        }
        self.diagnostics.push(Diagnostic::from_message(
            &diagnostic_messages::CANNOT_FIND_NAME,
            range.start,
            range.len(),
            &[name],
        ));
    }

    pub(crate) fn current_class(&self) -> Option<ClassFrame> {
        self.class_stack.last().copied()
    }

    fn class_infos(&self) -> Vec<ClassInfo> {
        self.classes
            .iter()
            .filter_map(|(name, &class)| {
                let def = self.interner.class_def(class)?;
                let super_class = def
                    .super_class
                    .and_then(|base| self.interner.class_name(base))
                    .map(|base| base.to_string());
                let member = |(atom, type_id): (&scry_common::Atom, &TypeId), is_static| {
                    ClassMemberInfo {
                        name: self.interner.resolve_atom(*atom).to_string(),
                        type_text: self.interner.display(*type_id),
                        is_static,
                    }
                };
                let members = def
                    .instance_members
                    .iter()
                    .map(|entry| member(entry, false))
                    .chain(def.static_members.iter().map(|entry| member(entry, true)))
                    .collect();
                Some(ClassInfo {
                    name: name.clone(),
                    id: class,
                    super_class,
                    members,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod tests;
