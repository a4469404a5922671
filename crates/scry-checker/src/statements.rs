//! Statements and declaration binding.
//!
//! The checker does not walk statement trees itself: it plugs into the
//! return walk as its [`ExpressionTyper`] and binds declarations as the walk
//! passes them, so scopes are entered and left in step with the body.

use crate::return_type::ExpressionTyper;
use crate::state::TypeChecker;
use scry_ast::{CatchClause, Function, Node, VariableDeclaration, VariableKind};
use scry_binder::{DeclarationKind, ScopeKind, ScopeOptions, Symbol, SymbolFlags, SymbolKind};
use scry_common::TextRange;
use scry_solver::{TypeData, TypeId, get_property_type};
use tracing::trace;

/// How a pattern's identifiers are declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BindingKind {
    Variable(DeclarationKind),
    Parameter,
}

impl ExpressionTyper for TypeChecker<'_> {
    fn type_of(&mut self, expr: &Node) -> TypeId {
        self.infer(expr)
    }

    fn visit_statement(&mut self, stmt: &Node) {
        self.check_statement(stmt);
    }

    fn enter_block(&mut self, owner: &Node) {
        self.enter_block_scope(owner);
    }

    fn enter_catch(&mut self, clause: &CatchClause) {
        self.scopes.enter_scope(
            ScopeKind::Catch,
            ScopeOptions::with_range(TextRange::new(clause.start, clause.end)),
        );
        if let Some(param) = &clause.param {
            self.bind_pattern(param, TypeId::ANY, BindingKind::Variable(DeclarationKind::Let));
        }
        self.hoist_declarations(&clause.body.body);
    }

    fn exit_block(&mut self) {
        self.scopes.exit_scope();
    }
}

pub(crate) const fn declaration_kind(kind: VariableKind) -> DeclarationKind {
    match kind {
        VariableKind::Var => DeclarationKind::Var,
        VariableKind::Let => DeclarationKind::Let,
        VariableKind::Const => DeclarationKind::Const,
    }
}

impl TypeChecker<'_> {
    pub(crate) fn check_statement(&mut self, stmt: &Node) {
        match stmt {
            Node::VariableDeclaration(decl) => self.check_variable_declaration(decl),
            Node::FunctionDeclaration(func) => self.check_function_declaration(func),
            Node::ClassDeclaration(class) => {
                self.check_class(class, true);
            }
            Node::ExpressionStatement(stmt) => {
                self.infer(&stmt.expression);
            }
            Node::IfStatement(stmt) => {
                self.infer(&stmt.test);
            }
            Node::WhileStatement(stmt) | Node::DoWhileStatement(stmt) => {
                self.infer(&stmt.test);
            }
            Node::SwitchStatement(stmt) => {
                self.infer(&stmt.discriminant);
            }
            Node::ThrowStatement(stmt) => {
                self.infer(&stmt.argument);
            }
            _ => {}
        }
    }

    /// Open the scope of a block, loop or `switch` and bind loop heads.
    fn enter_block_scope(&mut self, owner: &Node) {
        self.scopes
            .enter_scope(ScopeKind::Block, ScopeOptions::with_range(owner.range()));
        match owner {
            Node::BlockStatement(block) => self.hoist_declarations(&block.body),
            Node::ForStatement(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    match &**init {
                        Node::VariableDeclaration(decl) => self.check_variable_declaration(decl),
                        expr => {
                            self.infer(expr);
                        }
                    }
                }
                for expr in [&for_stmt.test, &for_stmt.update].into_iter().flatten() {
                    self.infer(expr);
                }
            }
            Node::ForInStatement(each) => {
                self.infer(&each.right);
                self.bind_loop_head(&each.left, TypeId::STRING);
            }
            Node::ForOfStatement(each) => {
                let iterated = self.infer(&each.right);
                let element = self.iterated_element_type(iterated);
                self.bind_loop_head(&each.left, element);
            }
            Node::SwitchStatement(switch) => {
                for case in &switch.cases {
                    if let Some(test) = &case.test {
                        self.infer(test);
                    }
                }
            }
            _ => {}
        }
    }

    /// Element type produced by `for (x of iterated)`.
    pub(crate) fn iterated_element_type(&self, iterated: TypeId) -> TypeId {
        match self.interner.lookup(iterated) {
            Some(TypeData::Array(element)) => element,
            _ if iterated == TypeId::STRING => TypeId::STRING,
            _ => TypeId::ANY,
        }
    }

    fn bind_loop_head(&mut self, left: &Node, element: TypeId) {
        match left {
            Node::VariableDeclaration(decl) => {
                let kind = BindingKind::Variable(declaration_kind(decl.kind));
                for declarator in &decl.declarations {
                    self.bind_pattern(&declarator.id, element, kind);
                }
            }
            target => {
                self.infer(target);
            }
        }
    }

    pub(crate) fn check_variable_declaration(&mut self, decl: &VariableDeclaration) {
        let kind = BindingKind::Variable(declaration_kind(decl.kind));
        for declarator in &decl.declarations {
            let init_type = match &declarator.init {
                Some(init) => self.infer(init),
                None => TypeId::ANY,
            };
            self.bind_pattern(&declarator.id, init_type, kind);
        }
    }

    /// Bind every identifier in `pattern`. Destructured names take the
    /// matching property or element type, `any` when it cannot be found.
    pub(crate) fn bind_pattern(&mut self, pattern: &Node, type_id: TypeId, kind: BindingKind) {
        match pattern {
            Node::Identifier(ident) => {
                self.define_binding(&ident.name, type_id, kind, pattern.range());
            }
            Node::ObjectPattern(object) => {
                for property in &object.properties {
                    match property {
                        Node::Property(prop) => {
                            let property_type = if prop.computed {
                                TypeId::ANY
                            } else {
                                prop.key
                                    .property_key_name()
                                    .and_then(|name| {
                                        let atom = self.interner.intern_string(&name);
                                        get_property_type(self.interner, type_id, atom)
                                    })
                                    .unwrap_or(TypeId::ANY)
                            };
                            self.bind_pattern(&prop.value, property_type, kind);
                        }
                        Node::RestElement(rest) => {
                            self.bind_pattern(&rest.argument, TypeId::ANY, kind);
                        }
                        _ => {}
                    }
                }
            }
            Node::ArrayPattern(array) => {
                let element = self.interner.array_element(type_id).unwrap_or(TypeId::ANY);
                for item in array.elements.iter().flatten() {
                    match item {
                        Node::RestElement(rest) => {
                            let rest_type = self.interner.array(element);
                            self.bind_pattern(&rest.argument, rest_type, kind);
                        }
                        other => self.bind_pattern(other, element, kind),
                    }
                }
            }
            Node::AssignmentPattern(assign) => {
                let default_type = self.infer(&assign.right);
                let bound = if matches!(type_id, TypeId::ANY | TypeId::UNDEFINED) {
                    default_type
                } else {
                    type_id
                };
                self.bind_pattern(&assign.left, bound, kind);
            }
            Node::RestElement(rest) => {
                self.bind_pattern(&rest.argument, type_id, kind);
            }
            _ => {}
        }
    }

    fn define_binding(&mut self, name: &str, type_id: TypeId, kind: BindingKind, range: TextRange) {
        match kind {
            BindingKind::Variable(DeclarationKind::Var) => {
                let symbol = Symbol::variable(name, DeclarationKind::Var, type_id).with_declaration(range);
                self.scopes.define_hoisted(symbol);
            }
            BindingKind::Variable(declaration) => {
                let symbol = Symbol::variable(name, declaration, type_id).with_declaration(range);
                self.scopes.define(symbol);
            }
            BindingKind::Parameter => {
                let symbol =
                    Symbol::new(name, SymbolKind::Parameter, type_id).with_declaration(range);
                self.scopes.define(symbol);
            }
        }
    }

    fn check_function_declaration(&mut self, func: &Function) {
        let function_type = self.check_function(func, ScopeKind::Function, None, &[]);
        let Some(name) = func.name() else {
            return;
        };
        let hoisted = self
            .scopes
            .resolve_in_current(name)
            .filter(|&id| self.scopes.symbol(id).is_some_and(|s| s.kind == SymbolKind::Function));
        match hoisted {
            Some(id) => self.scopes.set_symbol_type(id, function_type),
            None => {
                let symbol = Symbol::new(name, SymbolKind::Function, function_type)
                    .with_flags(function_flags(func))
                    .with_declaration(TextRange::new(func.start, func.end));
                self.scopes.define(symbol);
            }
        }
    }

    /// Make function declarations and top-level `var` names visible before
    /// the statements that declare them. Function types are placeholders
    /// until the declaration itself is checked.
    pub(crate) fn hoist_declarations(&mut self, statements: &[Node]) {
        for stmt in statements {
            match stmt {
                Node::FunctionDeclaration(func) => {
                    let Some(name) = func.name() else {
                        continue;
                    };
                    if self.scopes.resolve_in_current(name).is_some() {
                        continue;
                    }
                    let placeholder = self.placeholder_function_type(func);
                    let symbol = Symbol::new(name, SymbolKind::Function, placeholder)
                        .with_flags(function_flags(func) | SymbolFlags::HOISTED)
                        .with_declaration(TextRange::new(func.start, func.end));
                    self.scopes.define(symbol);
                    trace!(name, "hoisted function");
                }
                Node::VariableDeclaration(decl) if decl.kind == VariableKind::Var => {
                    for declarator in &decl.declarations {
                        if let Node::Identifier(ident) = &*declarator.id
                            && self.scopes.resolve_in_current(&ident.name).is_none()
                        {
                            let symbol =
                                Symbol::variable(&ident.name, DeclarationKind::Var, TypeId::ANY)
                                    .with_flags(SymbolFlags::HOISTED)
                                    .with_declaration(declarator.id.range());
                            self.scopes.define_hoisted(symbol);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

pub(crate) fn function_flags(func: &Function) -> SymbolFlags {
    let mut flags = SymbolFlags::empty();
    if func.is_async {
        flags |= SymbolFlags::ASYNC;
    }
    if func.is_generator {
        flags |= SymbolFlags::GENERATOR;
    }
    flags
}

#[cfg(test)]
#[path = "../tests/statements_tests.rs"]
mod tests;
