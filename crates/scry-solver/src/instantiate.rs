//! Generic type instantiation and substitution.
//!
//! Substitution replaces type variables by name. When nothing under a type
//! changes, the original `TypeId` is returned, so callers can detect a no-op
//! with a plain id comparison.
//!
//! `Class` and `Instance` types are returned unchanged: class bodies are not
//! parameterised.

use crate::types::*;
use crate::TypeInterner;
use indexmap::IndexMap;
use scry_common::limits::MAX_INSTANTIATION_DEPTH;
use scry_common::Atom;
use std::fmt;
use tracing::trace;

/// A mapping from type-variable names to replacement types, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSubstitution {
    map: IndexMap<Atom, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution {
            map: IndexMap::new(),
        }
    }

    /// Insert or replace a binding.
    pub fn insert(&mut self, name: Atom, type_id: TypeId) {
        self.map.insert(name, type_id);
    }

    pub fn get(&self, name: Atom) -> Option<TypeId> {
        self.map.get(&name).copied()
    }

    pub fn contains(&self, name: Atom) -> bool {
        self.map.contains_key(&name)
    }

    pub fn remove(&mut self, name: Atom) -> Option<TypeId> {
        self.map.shift_remove(&name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, TypeId)> + '_ {
        self.map.iter().map(|(&name, &ty)| (name, ty))
    }
}

impl FromIterator<(Atom, TypeId)> for TypeSubstitution {
    fn from_iter<I: IntoIterator<Item = (Atom, TypeId)>>(iter: I) -> Self {
        TypeSubstitution {
            map: iter.into_iter().collect(),
        }
    }
}

/// Type variables still free after `resolve_completely`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unresolved {
    pub names: Vec<String>,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unresolved type variables: {}", self.names.join(", "))
    }
}

impl std::error::Error for Unresolved {}

/// Instantiator that applies a substitution with a depth guard.
pub struct TypeInstantiator<'a> {
    interner: &'a TypeInterner,
    depth: u32,
}

impl<'a> TypeInstantiator<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        TypeInstantiator { interner, depth: 0 }
    }

    pub fn instantiate(&mut self, type_id: TypeId, subst: &TypeSubstitution) -> TypeId {
        if subst.is_empty() || type_id.is_intrinsic() {
            return type_id;
        }
        if self.depth >= MAX_INSTANTIATION_DEPTH {
            return type_id;
        }
        self.depth += 1;
        let result = self.instantiate_inner(type_id, subst);
        self.depth -= 1;
        result
    }

    fn instantiate_inner(&mut self, type_id: TypeId, subst: &TypeSubstitution) -> TypeId {
        let Some(data) = self.interner.lookup(type_id) else {
            return type_id;
        };
        match data {
            TypeData::TypeVariable(info) => subst.get(info.name).unwrap_or(type_id),
            TypeData::Array(element) => {
                let new_element = self.instantiate(element, subst);
                if new_element == element {
                    type_id
                } else {
                    self.interner.array(new_element)
                }
            }
            TypeData::Object(shape) => {
                let mut changed = false;
                let properties = shape
                    .properties
                    .iter()
                    .map(|prop| {
                        let new_type = self.instantiate(prop.type_id, subst);
                        changed |= new_type != prop.type_id;
                        PropertyInfo {
                            type_id: new_type,
                            ..prop.clone()
                        }
                    })
                    .collect();
                if changed {
                    self.interner.object(properties)
                } else {
                    type_id
                }
            }
            TypeData::Function(shape) => {
                let mut changed = false;
                let params = shape
                    .params
                    .iter()
                    .map(|param| {
                        let new_type = self.instantiate(param.type_id, subst);
                        changed |= new_type != param.type_id;
                        ParamInfo {
                            type_id: new_type,
                            ..param.clone()
                        }
                    })
                    .collect();
                let return_type = self.instantiate(shape.return_type, subst);
                changed |= return_type != shape.return_type;
                if changed {
                    self.interner.function(FunctionShape {
                        params,
                        return_type,
                        is_async: shape.is_async,
                        is_generator: shape.is_generator,
                    })
                } else {
                    type_id
                }
            }
            TypeData::Union(members) => {
                let new_members: Vec<TypeId> = members
                    .iter()
                    .map(|&member| self.instantiate(member, subst))
                    .collect();
                if new_members.iter().eq(members.iter()) {
                    type_id
                } else {
                    self.interner.union(new_members)
                }
            }
            TypeData::Generic(generic) => {
                // The generic's own parameters shadow outer bindings.
                let mut inner = subst.clone();
                for &param in &generic.type_params {
                    if let Some(info) = self.interner.type_var_info(param) {
                        inner.remove(info.name);
                    }
                }
                let base = self.instantiate(generic.base, &inner);
                if base == generic.base {
                    type_id
                } else {
                    self.interner.generic(base, generic.type_params.clone())
                }
            }
            TypeData::Class(_)
            | TypeData::Instance(_)
            | TypeData::Any
            | TypeData::Unknown
            | TypeData::Never
            | TypeData::Void
            | TypeData::Primitive(_) => type_id,
        }
    }
}

/// Apply a substitution to a type.
pub fn instantiate_type(interner: &TypeInterner, type_id: TypeId, subst: &TypeSubstitution) -> TypeId {
    TypeInstantiator::new(interner).instantiate(type_id, subst)
}

/// Free type variables of a type, deduplicated by name in first-seen order.
pub fn collect_type_variables(interner: &TypeInterner, type_id: TypeId) -> Vec<TypeId> {
    let mut found = Vec::new();
    let mut seen = Vec::new();
    collect_into(interner, type_id, &[], &mut seen, &mut found, 0);
    found
}

fn collect_into(
    interner: &TypeInterner,
    type_id: TypeId,
    bound: &[Atom],
    seen: &mut Vec<Atom>,
    found: &mut Vec<TypeId>,
    depth: u32,
) {
    if type_id.is_intrinsic() || depth >= MAX_INSTANTIATION_DEPTH {
        return;
    }
    let Some(data) = interner.lookup(type_id) else {
        return;
    };
    let depth = depth + 1;
    match data {
        TypeData::TypeVariable(info) => {
            if !bound.contains(&info.name) && !seen.contains(&info.name) {
                seen.push(info.name);
                found.push(type_id);
            }
        }
        TypeData::Array(element) => collect_into(interner, element, bound, seen, found, depth),
        TypeData::Object(shape) => {
            for prop in &shape.properties {
                collect_into(interner, prop.type_id, bound, seen, found, depth);
            }
        }
        TypeData::Function(shape) => {
            for param in &shape.params {
                collect_into(interner, param.type_id, bound, seen, found, depth);
            }
            collect_into(interner, shape.return_type, bound, seen, found, depth);
        }
        TypeData::Union(members) => {
            for &member in members.iter() {
                collect_into(interner, member, bound, seen, found, depth);
            }
        }
        TypeData::Generic(generic) => {
            let mut inner_bound = bound.to_vec();
            inner_bound.extend(
                generic
                    .type_params
                    .iter()
                    .filter_map(|&p| interner.type_var_info(p))
                    .map(|info| info.name),
            );
            collect_into(interner, generic.base, &inner_bound, seen, found, depth);
        }
        TypeData::Class(_)
        | TypeData::Instance(_)
        | TypeData::Any
        | TypeData::Unknown
        | TypeData::Never
        | TypeData::Void
        | TypeData::Primitive(_) => {}
    }
}

/// Substitute and require that no type variable remains free.
pub fn resolve_completely(
    interner: &TypeInterner,
    type_id: TypeId,
    subst: &TypeSubstitution,
) -> Result<TypeId, Unresolved> {
    let result = instantiate_type(interner, type_id, subst);
    let free = collect_type_variables(interner, result);
    if free.is_empty() {
        return Ok(result);
    }
    let names = free
        .into_iter()
        .filter_map(|ty| interner.type_var_info(ty))
        .map(|info| interner.resolve_atom(info.name).to_string())
        .collect();
    Err(Unresolved { names })
}

/// Instantiate a `Generic` with explicit type arguments. Missing arguments
/// fall back to the parameter's constraint, else `any`. Results are cached
/// per generic and argument ids.
pub fn instantiate_generic(interner: &TypeInterner, generic: TypeId, type_args: &[TypeId]) -> TypeId {
    let Some(TypeData::Generic(shape)) = interner.lookup(generic) else {
        return generic;
    };

    if let Some(cached) = interner.cached_generic_instance(generic, type_args) {
        trace!(generic = generic.0, args = type_args.len(), "generic instantiation cache hit");
        return cached;
    }

    let mut subst = TypeSubstitution::new();
    for (i, &param) in shape.type_params.iter().enumerate() {
        let Some(info) = interner.type_var_info(param) else {
            continue;
        };
        let arg = type_args
            .get(i)
            .copied()
            .unwrap_or_else(|| info.constraint.unwrap_or(TypeId::ANY));
        subst.insert(info.name, arg);
    }
    let result = instantiate_type(interner, shape.base, &subst);
    interner.cache_generic_instance(generic, type_args, result);
    result
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
