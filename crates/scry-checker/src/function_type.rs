//! Function, arrow and method signatures.

use crate::return_type::analyze_return_type;
use crate::state::TypeChecker;
use crate::statements::BindingKind;
use scry_ast::{Function, Node};
use scry_binder::{ScopeKind, ScopeOptions, Symbol, SymbolId, SymbolKind};
use scry_common::TextRange;
use scry_solver::{FunctionShape, ParamInfo, TypeId};

impl TypeChecker<'_> {
    /// Type of a function-like node. `hints` are contextual parameter types,
    /// e.g. the element type for an `Array.prototype.map` callback.
    pub(crate) fn check_function(
        &mut self,
        func: &Function,
        scope_kind: ScopeKind,
        this_type: Option<TypeId>,
        hints: &[TypeId],
    ) -> TypeId {
        let shape = self.check_function_shape(func, scope_kind, this_type, None, hints);
        self.interner.function(shape)
    }

    pub(crate) fn check_function_shape(
        &mut self,
        func: &Function,
        scope_kind: ScopeKind,
        this_type: Option<TypeId>,
        function_symbol: Option<SymbolId>,
        hints: &[TypeId],
    ) -> FunctionShape {
        let mut options = ScopeOptions::with_range(TextRange::new(func.start, func.end));
        if let Some(this_type) = this_type {
            options = options.this_type(this_type);
        }
        if let Some(symbol) = function_symbol {
            options = options.function_symbol(symbol);
        }
        self.scopes.enter_scope(scope_kind, options);

        // A named function expression sees its own name.
        if scope_kind == ScopeKind::Function
            && let Some(name) = func.name()
            && self.scopes.resolve(name).is_none()
        {
            let placeholder = self.placeholder_function_type(func);
            self.scopes
                .define(Symbol::new(name, SymbolKind::Function, placeholder));
        }

        let params = self.bind_parameters(&func.params, hints);
        let is_expression_body = func.has_expression_body();
        if !is_expression_body && let Node::BlockStatement(block) = &*func.body {
            self.hoist_declarations(&block.body);
        }
        let interner = self.interner;
        let body_type = analyze_return_type(interner, &func.body, is_expression_body, self);
        self.scopes.exit_scope();

        let return_type = if func.is_generator {
            self.generator_type()
        } else if func.is_async {
            self.promise_of(body_type)
        } else {
            body_type
        };
        FunctionShape {
            params,
            return_type,
            is_async: func.is_async,
            is_generator: func.is_generator,
        }
    }

    /// Declare parameters in the current scope and describe them.
    fn bind_parameters(&mut self, params: &[Node], hints: &[TypeId]) -> Vec<ParamInfo> {
        let mut infos = Vec::with_capacity(params.len());
        for (index, param) in params.iter().enumerate() {
            let hint = hints.get(index).copied().filter(|&hint| hint != TypeId::ANY);
            let name = self.interner.intern_string(&parameter_name(param, index));
            let info = match param {
                Node::AssignmentPattern(assign) => {
                    let default_type = self.infer(&assign.right);
                    let type_id = hint.unwrap_or(default_type);
                    self.bind_pattern(&assign.left, type_id, BindingKind::Parameter);
                    ParamInfo::optional(name, type_id)
                }
                Node::RestElement(rest) => {
                    let type_id = hint
                        .filter(|&hint| self.interner.array_element(hint).is_some())
                        .unwrap_or_else(|| self.interner.array(TypeId::ANY));
                    self.bind_pattern(&rest.argument, type_id, BindingKind::Parameter);
                    ParamInfo::rest(name, type_id)
                }
                pattern => {
                    let type_id = hint.unwrap_or(TypeId::ANY);
                    self.bind_pattern(pattern, type_id, BindingKind::Parameter);
                    ParamInfo::required(name, type_id)
                }
            };
            infos.push(info);
        }
        infos
    }

    /// Signature with `any` parameters and result, used before the body has
    /// been analysed.
    pub(crate) fn placeholder_function_type(&self, func: &Function) -> TypeId {
        let params = func
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let name = self.interner.intern_string(&parameter_name(param, index));
                match param {
                    Node::AssignmentPattern(_) => ParamInfo::optional(name, TypeId::ANY),
                    Node::RestElement(_) => {
                        ParamInfo::rest(name, self.interner.array(TypeId::ANY))
                    }
                    _ => ParamInfo::required(name, TypeId::ANY),
                }
            })
            .collect();
        self.interner.function(FunctionShape::new(params, TypeId::ANY))
    }

    /// Generators are approximated by their iterator protocol:
    /// `{ next: () => { value: any; done: boolean } }`.
    pub(crate) fn generator_type(&self) -> TypeId {
        let step = self
            .interner
            .object_from_pairs(&[("value", TypeId::ANY), ("done", TypeId::BOOLEAN)]);
        let next = self.interner.simple_function(&[], step);
        self.interner.object_from_pairs(&[("next", next)])
    }
}

fn parameter_name(param: &Node, index: usize) -> String {
    match param {
        Node::Identifier(ident) => ident.name.clone(),
        Node::AssignmentPattern(assign) => parameter_name(&assign.left, index),
        Node::RestElement(rest) => parameter_name(&rest.argument, index),
        _ => format!("arg{index}"),
    }
}

#[cfg(test)]
#[path = "../tests/function_type_tests.rs"]
mod tests;
