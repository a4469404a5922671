//! Generic type argument inference.
//!
//! Inference walks each argument position, matching the declared parameter
//! type (expected) against the argument type (actual) and binding any
//! expected type parameter it reaches:
//!
//! - a known type parameter binds on first occurrence; a later, structurally
//!   different candidate is unified with the existing binding
//! - arrays recurse into element types
//! - functions recurse into the shared parameter prefix and the return type
//!   (covariantly; inference does not flip parameter variance)
//! - objects recurse into every expected property the actual type has
//! - an expected union tries every member
//!
//! Once all positions are matched, unbound parameters default to their
//! constraint (else `any`), and a binding that violates its constraint is
//! replaced by the constraint itself. Inference never fails.

use crate::instantiate::{TypeSubstitution, collect_type_variables, instantiate_type};
use crate::relation::{is_assignable_to, types_equal};
use crate::types::*;
use crate::TypeInterner;
use scry_common::limits::MAX_INFERENCE_DEPTH;
use std::sync::Arc;
use tracing::{debug, trace};

pub struct InferenceContext<'a> {
    interner: &'a TypeInterner,
    type_params: Vec<TypeVarInfo>,
    bindings: TypeSubstitution,
    depth: u32,
}

impl<'a> InferenceContext<'a> {
    /// Context inferring the given `TypeVariable` types. Non-variable ids are ignored.
    pub fn new(interner: &'a TypeInterner, type_params: &[TypeId]) -> Self {
        let type_params = type_params
            .iter()
            .filter_map(|&param| interner.type_var_info(param))
            .collect();
        InferenceContext {
            interner,
            type_params,
            bindings: TypeSubstitution::new(),
            depth: 0,
        }
    }

    /// Current (raw) bindings, before defaults and constraint checks.
    pub fn bindings(&self) -> &TypeSubstitution {
        &self.bindings
    }

    /// Match an expected type against an actual type, recording bindings.
    pub fn infer_from(&mut self, expected: TypeId, actual: TypeId) {
        if expected == actual && !self.mentions_param(expected) {
            return;
        }
        if self.depth >= MAX_INFERENCE_DEPTH {
            trace!("inference depth exceeded");
            return;
        }
        self.depth += 1;
        self.infer_inner(expected, actual);
        self.depth -= 1;
    }

    fn infer_inner(&mut self, expected: TypeId, actual: TypeId) {
        let Some(expected_data) = self.interner.lookup(expected) else {
            return;
        };

        if let TypeData::TypeVariable(info) = &expected_data {
            if self.is_param(info) {
                self.bind(info.clone(), actual);
            }
            return;
        }
        if let TypeData::Union(members) = &expected_data {
            for &member in members.iter() {
                self.infer_from(member, actual);
            }
            return;
        }

        let actual = self.strip_generic(actual);
        let Some(actual_data) = self.interner.lookup(actual) else {
            return;
        };
        match (expected_data, actual_data) {
            (TypeData::Array(e), TypeData::Array(a)) => self.infer_from(e, a),
            (TypeData::Function(e), TypeData::Function(a)) => {
                for (ep, ap) in e.params.iter().zip(a.params.iter()) {
                    self.infer_from(ep.type_id, ap.type_id);
                }
                self.infer_from(e.return_type, a.return_type);
            }
            (TypeData::Object(e), TypeData::Object(a)) => {
                for prop in &e.properties {
                    if let Some(actual_prop) = a.property(prop.name) {
                        self.infer_from(prop.type_id, actual_prop.type_id);
                    }
                }
            }
            (TypeData::Generic(e), _) => self.infer_from(e.base, actual),
            _ => {}
        }
    }

    fn bind(&mut self, info: TypeVarInfo, actual: TypeId) {
        match self.bindings.get(info.name) {
            None => {
                debug!(
                    param = %self.interner.resolve_atom(info.name),
                    actual = %self.interner.display(actual),
                    "bind type parameter"
                );
                self.bindings.insert(info.name, actual);
            }
            Some(existing) if !types_equal(self.interner, existing, actual) => {
                let unified = unify_candidates(self.interner, existing, actual);
                debug!(
                    param = %self.interner.resolve_atom(info.name),
                    existing = %self.interner.display(existing),
                    actual = %self.interner.display(actual),
                    unified = %self.interner.display(unified),
                    "unify type parameter candidates"
                );
                self.bindings.insert(info.name, unified);
            }
            Some(_) => {}
        }
    }

    /// Apply defaults and constraint checks and return bindings in
    /// declaration order.
    pub fn finish(self) -> TypeSubstitution {
        let mut result = TypeSubstitution::new();
        for info in &self.type_params {
            let bound = match self.bindings.get(info.name) {
                Some(ty) => match info.constraint {
                    Some(constraint) if !is_assignable_to(self.interner, ty, constraint) => {
                        debug!(
                            param = %self.interner.resolve_atom(info.name),
                            "binding violates constraint; falling back to the constraint"
                        );
                        constraint
                    }
                    _ => ty,
                },
                None => info.constraint.unwrap_or(TypeId::ANY),
            };
            result.insert(info.name, bound);
        }
        result
    }

    fn is_param(&self, info: &TypeVarInfo) -> bool {
        self.type_params.iter().any(|p| p.id == info.id)
    }

    fn mentions_param(&self, type_id: TypeId) -> bool {
        collect_type_variables(self.interner, type_id)
            .into_iter()
            .filter_map(|ty| self.interner.type_var_info(ty))
            .any(|info| self.is_param(&info))
    }

    /// Generic actuals are matched through their base.
    fn strip_generic(&self, actual: TypeId) -> TypeId {
        match self.interner.lookup(actual) {
            Some(TypeData::Generic(generic)) => generic.base,
            _ => actual,
        }
    }
}

/// Infer bindings for `type_params` from a call of `func` with `arg_types`.
///
/// A trailing rest parameter `...xs: T[]` matches every remaining argument
/// against `T`.
#[tracing::instrument(level = "debug", skip_all, fields(args = arg_types.len()))]
pub fn infer_type_arguments(
    interner: &TypeInterner,
    func: TypeId,
    arg_types: &[TypeId],
    type_params: &[TypeId],
) -> TypeSubstitution {
    let mut ctx = InferenceContext::new(interner, type_params);
    if let Some(shape) = interner.function_shape(func) {
        for (i, &actual) in arg_types.iter().enumerate() {
            let Some(expected) = expected_param_type(interner, &shape, i) else {
                break;
            };
            ctx.infer_from(expected, actual);
        }
    }
    ctx.finish()
}

fn expected_param_type(interner: &TypeInterner, shape: &Arc<FunctionShape>, index: usize) -> Option<TypeId> {
    let param = shape
        .params
        .get(index)
        .or_else(|| shape.rest_param())?;
    if param.rest {
        Some(interner.array_element(param.type_id).unwrap_or(param.type_id))
    } else {
        Some(param.type_id)
    }
}

/// Combine two candidate bindings for the same type parameter.
///
/// Equal types return as-is; `any` and `unknown` absorb the other side; if
/// one is assignable to the other the more general one wins; two arrays
/// unify their elements; otherwise the result is the union of both. The
/// result does not depend on argument order.
pub fn unify_candidates(interner: &TypeInterner, a: TypeId, b: TypeId) -> TypeId {
    unify_at_depth(interner, a, b, 0)
}

fn unify_at_depth(interner: &TypeInterner, a: TypeId, b: TypeId, depth: u32) -> TypeId {
    if types_equal(interner, a, b) {
        return a;
    }
    // `any` is assignable both ways, so let the union rules pick.
    if a.is_top() || b.is_top() {
        return interner.union2(a, b);
    }
    match (
        is_assignable_to(interner, a, b),
        is_assignable_to(interner, b, a),
    ) {
        // Mutually assignable (`null` and `undefined`): lowest id wins.
        (true, true) => return a.min(b),
        (true, false) => return b,
        (false, true) => return a,
        (false, false) => {}
    }
    if depth < MAX_INFERENCE_DEPTH
        && let (Some(ea), Some(eb)) = (interner.array_element(a), interner.array_element(b))
    {
        let element = unify_at_depth(interner, ea, eb, depth + 1);
        return interner.array(element);
    }
    interner.union2(a, b)
}

/// Infer and instantiate a call to `callee`, returning the call's result type.
///
/// `Generic` callees infer their declared parameters; plain functions infer
/// whatever type variables appear free in their signature. Bindings are
/// cached per callee and argument ids.
#[tracing::instrument(level = "debug", skip_all, fields(callee = callee.0))]
pub fn instantiate_generic_call(interner: &TypeInterner, callee: TypeId, arg_types: &[TypeId]) -> TypeId {
    let Some(shape) = interner.function_shape(callee) else {
        return TypeId::ANY;
    };

    let type_params = match interner.lookup(callee) {
        Some(TypeData::Generic(generic)) => generic.type_params.clone(),
        _ => collect_type_variables(interner, callee),
    };
    if type_params.is_empty() {
        return shape.return_type;
    }

    let bindings = match interner.cached_call_bindings(callee, arg_types) {
        Some(bindings) => bindings,
        None => {
            let bindings = infer_type_arguments(interner, callee, arg_types, &type_params);
            interner.cache_call_bindings(callee, arg_types, bindings.clone());
            bindings
        }
    };
    instantiate_type(interner, shape.return_type, &bindings)
}

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod tests;
