//! Call expressions.
//!
//! Callbacks are checked with contextual parameter types: array methods
//! hand the element type to their callback, and any other callee hands over
//! the parameter types of its function-typed parameters.

use crate::state::TypeChecker;
use scry_ast::{CallExpression, Node};
use scry_binder::ScopeKind;
use scry_solver::array_methods::CallbackShape;
use scry_solver::{
    ArrayMethodSignature, FunctionShape, TypeData, TypeId, array_method_return_type,
    callback_parameter_types, collect_type_variables, get_property_type, lookup_array_method,
};
use tracing::trace;

impl TypeChecker<'_> {
    pub(crate) fn check_call(&mut self, call: &CallExpression) -> TypeId {
        let Node::MemberExpression(member) = &*call.callee else {
            let callee = self.infer(&call.callee);
            return self.call_with_arguments(callee, &call.arguments);
        };
        let Some(name) = member.static_property_name() else {
            let callee = self.infer(&call.callee);
            return self.call_with_arguments(callee, &call.arguments);
        };

        let receiver = self.infer(&member.object);
        if let Some(element) = self.interner.array_element(receiver)
            && let Some(sig) = lookup_array_method(name)
            && !sig.is_property
        {
            return self.check_array_method_call(sig, element, &call.arguments);
        }
        if name == "resolve" && self.is_promise_constructor(receiver) {
            let payload = match call.arguments.first() {
                Some(argument) => self.infer(argument),
                None => TypeId::VOID,
            };
            return self.promise_of(payload);
        }

        let atom = self.interner.intern_string(name);
        let callee = get_property_type(self.interner, receiver, atom).unwrap_or(TypeId::ANY);
        self.call_with_arguments(callee, &call.arguments)
    }

    fn is_promise_constructor(&self, receiver: TypeId) -> bool {
        matches!(
            (self.interner.lookup(receiver), self.promise_class()),
            (Some(TypeData::Class(class)), Some(promise)) if class == promise
        )
    }

    /// `array.method(callback, ...)` with the callback typed from the
    /// element type. Reducers first infer their initializer, which becomes
    /// the accumulator type.
    fn check_array_method_call(
        &mut self,
        sig: &ArrayMethodSignature,
        element: TypeId,
        arguments: &[Node],
    ) -> TypeId {
        if sig.callback == CallbackShape::None {
            for argument in arguments {
                self.infer(argument);
            }
            return array_method_return_type(self.interner, sig, element, None, None);
        }

        let initializer = match (sig.callback, arguments.get(1)) {
            (CallbackShape::Reducer, Some(initial)) => Some(self.infer(initial)),
            _ => None,
        };
        let callback_return = arguments.first().map(|callback| {
            let hints = callback_parameter_types(self.interner, sig, element, initializer);
            self.callback_return_type(callback, &hints)
        });
        if sig.callback != CallbackShape::Reducer {
            for argument in arguments.iter().skip(1) {
                self.infer(argument);
            }
        }
        trace!(method = sig.name, element = element.0, "array method call");
        array_method_return_type(self.interner, sig, element, callback_return, initializer)
    }

    /// Check `callback` with `hints` as its parameter types and return what
    /// it produces.
    fn callback_return_type(&mut self, callback: &Node, hints: &[TypeId]) -> TypeId {
        match callback {
            Node::ArrowFunctionExpression(func) => {
                self.check_function_shape(func, ScopeKind::Arrow, None, None, hints)
                    .return_type
            }
            Node::FunctionExpression(func) => {
                self.check_function_shape(func, ScopeKind::Function, None, None, hints)
                    .return_type
            }
            other => {
                let callback_type = self.infer(other);
                self.interner
                    .function_shape(callback_type)
                    .map_or(TypeId::ANY, |shape| shape.return_type)
            }
        }
    }

    fn call_with_arguments(&mut self, callee: TypeId, arguments: &[Node]) -> TypeId {
        let shape = self.interner.function_shape(callee);
        let mut arg_types = Vec::with_capacity(arguments.len());
        for (index, argument) in arguments.iter().enumerate() {
            let expected = shape
                .as_deref()
                .and_then(|shape| parameter_type_at(self.interner, shape, index));
            let hints = expected.map(|expected| self.contextual_hints(expected)).unwrap_or_default();
            let type_id = match argument {
                Node::ArrowFunctionExpression(func) => {
                    self.check_function(func, ScopeKind::Arrow, None, &hints)
                }
                Node::FunctionExpression(func) => {
                    self.check_function(func, ScopeKind::Function, None, &hints)
                }
                Node::SpreadElement(spread) => {
                    let spread_type = self.infer(&spread.argument);
                    self.iterated_element_type(spread_type)
                }
                other => self.infer(other),
            };
            arg_types.push(type_id);
        }
        self.call_result_type(callee, &arg_types)
    }

    /// Parameter types a callback should assume when passed where
    /// `expected` is wanted. Parameters mentioning type variables stay
    /// `any` since they are only fixed by the call itself.
    fn contextual_hints(&self, expected: TypeId) -> Vec<TypeId> {
        let Some(expected) = self.interner.function_shape(expected) else {
            return Vec::new();
        };
        expected
            .params
            .iter()
            .map(|param| {
                if collect_type_variables(self.interner, param.type_id).is_empty() {
                    param.type_id
                } else {
                    TypeId::ANY
                }
            })
            .collect()
    }
}

/// The parameter type that receives the argument at `index`. Arguments past
/// a rest parameter take its element type.
fn parameter_type_at(
    interner: &scry_solver::TypeInterner,
    shape: &FunctionShape,
    index: usize,
) -> Option<TypeId> {
    match shape.params.get(index) {
        Some(param) if param.rest => interner.array_element(param.type_id),
        Some(param) => Some(param.type_id),
        None => {
            let rest = shape.rest_param()?;
            interner.array_element(rest.type_id)
        }
    }
}

#[cfg(test)]
#[path = "../tests/call_checker_tests.rs"]
mod tests;
