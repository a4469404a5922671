//! Structural equality and assignability.
//!
//! Both relations are coinductive: a pair that is already being compared
//! further up the stack is assumed to hold. Past `MAX_RELATION_DEPTH` the
//! checker gives up and answers `false`.
//!
//! Assignability rules:
//! - everything is assignable to `any`/`unknown`; `never` and `any` are
//!   assignable to everything
//! - primitives only to the same kind, except `null` <-> `undefined`
//! - arrays are covariant in the element type
//! - functions are contravariant in parameters and covariant in the return
//!   type; a `void` target return accepts any source return
//! - objects use width subtyping; instances and classes are viewed through
//!   their inherited members when the target is an object
//! - instances and classes are assignable along the inheritance chain

use crate::class_hierarchy::{inherited_instance_members, inherited_static_members, is_derived_from};
use crate::instantiate::{TypeSubstitution, instantiate_type};
use crate::types::*;
use crate::TypeInterner;
use rustc_hash::FxHashSet;
use scry_common::limits::MAX_RELATION_DEPTH;
use scry_common::Atom;
use std::sync::Arc;

pub struct SubtypeChecker<'a> {
    interner: &'a TypeInterner,
    in_progress: FxHashSet<(TypeId, TypeId)>,
    depth: u32,
}

impl<'a> SubtypeChecker<'a> {
    pub fn new(interner: &'a TypeInterner) -> Self {
        SubtypeChecker {
            interner,
            in_progress: FxHashSet::default(),
            depth: 0,
        }
    }

    // =========================================================================
    // Equality
    // =========================================================================

    /// Structural equality. Intrinsics compare by identity.
    pub fn equals(&mut self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        if a.is_intrinsic() || b.is_intrinsic() {
            return false;
        }
        self.guarded((a, b), |this| this.equals_structural(a, b))
    }

    fn equals_structural(&mut self, a: TypeId, b: TypeId) -> bool {
        let (Some(left), Some(right)) = (self.interner.lookup(a), self.interner.lookup(b)) else {
            return false;
        };
        match (left, right) {
            (TypeData::Array(x), TypeData::Array(y)) => self.equals(x, y),
            (TypeData::Object(x), TypeData::Object(y)) => self.objects_equal(&x, &y),
            (TypeData::Function(x), TypeData::Function(y)) => self.functions_equal(&x, &y),
            (TypeData::Class(x), TypeData::Class(y))
            | (TypeData::Instance(x), TypeData::Instance(y)) => self.classes_equal(x, y),
            (TypeData::Union(x), TypeData::Union(y)) => {
                x.len() == y.len()
                    && x.iter().all(|&m| y.iter().any(|&n| self.equals(m, n)))
                    && y.iter().all(|&n| x.iter().any(|&m| self.equals(m, n)))
            }
            (TypeData::Generic(x), TypeData::Generic(y)) => {
                x.type_params.len() == y.type_params.len()
                    && x
                        .type_params
                        .iter()
                        .zip(y.type_params.iter())
                        .all(|(&p, &q)| self.equals(p, q))
                    && self.equals(x.base, y.base)
            }
            // Type variables are distinct per creation; interning already
            // merged identical ones.
            _ => false,
        }
    }

    fn objects_equal(&mut self, x: &ObjectShape, y: &ObjectShape) -> bool {
        x.properties.len() == y.properties.len()
            && x.properties.iter().all(|prop| {
                y.property(prop.name).is_some_and(|other| {
                    other.optional == prop.optional && self.equals(prop.type_id, other.type_id)
                })
            })
    }

    fn functions_equal(&mut self, x: &FunctionShape, y: &FunctionShape) -> bool {
        x.params.len() == y.params.len()
            && x.is_async == y.is_async
            && x.is_generator == y.is_generator
            && x.params.iter().zip(y.params.iter()).all(|(p, q)| {
                p.optional == q.optional && p.rest == q.rest && self.equals(p.type_id, q.type_id)
            })
            && self.equals(x.return_type, y.return_type)
    }

    fn classes_equal(&mut self, x: ClassId, y: ClassId) -> bool {
        if x == y {
            return true;
        }
        let (Some(left), Some(right)) = (self.interner.class_def(x), self.interner.class_def(y))
        else {
            return false;
        };
        if left.name != right.name {
            return false;
        }
        let supers_equal = match (left.super_class, right.super_class) {
            (None, None) => true,
            (Some(p), Some(q)) => {
                let (p, q) = (self.interner.class_type(p), self.interner.class_type(q));
                self.equals(p, q)
            }
            _ => false,
        };
        supers_equal
            && self.member_maps_equal(&left.instance_members, &right.instance_members)
            && self.member_maps_equal(&left.static_members, &right.static_members)
    }

    fn member_maps_equal(
        &mut self,
        x: &indexmap::IndexMap<Atom, TypeId>,
        y: &indexmap::IndexMap<Atom, TypeId>,
    ) -> bool {
        x.len() == y.len()
            && x
                .iter()
                .all(|(name, &ty)| y.get(name).is_some_and(|&other| self.equals(ty, other)))
    }

    // =========================================================================
    // Assignability
    // =========================================================================

    /// Is a value of type `source` assignable to a slot of type `target`?
    pub fn is_assignable(&mut self, source: TypeId, target: TypeId) -> bool {
        if source == target
            || target.is_top()
            || source == TypeId::NEVER
            || source == TypeId::ANY
        {
            return true;
        }
        if target == TypeId::NEVER {
            return false;
        }
        self.guarded((source, target), |this| {
            this.is_assignable_structural(source, target)
        })
    }

    fn is_assignable_structural(&mut self, source: TypeId, target: TypeId) -> bool {
        let (Some(src), Some(tgt)) = (self.interner.lookup(source), self.interner.lookup(target))
        else {
            return false;
        };

        // Source-side decomposition first so that a union source is checked
        // member-wise against a union target.
        match &src {
            TypeData::Union(members) => {
                return members.iter().all(|&m| self.is_assignable(m, target));
            }
            TypeData::TypeVariable(info) => {
                let stand_in = info.constraint.unwrap_or(TypeId::UNKNOWN);
                return self.is_assignable(stand_in, target);
            }
            TypeData::Generic(generic) => {
                let erased = self.erase_generic(generic);
                return self.is_assignable(erased, target);
            }
            _ => {}
        }

        match (src, tgt) {
            (_, TypeData::Union(members)) => {
                members.iter().any(|&m| self.is_assignable(source, m))
                    || self.equals(source, target)
            }
            (_, TypeData::Generic(generic)) => self.is_assignable(source, generic.base),
            (_, TypeData::TypeVariable(_)) => false,
            (TypeData::Primitive(PrimitiveKind::Undefined), TypeData::Void) => true,
            (TypeData::Primitive(s), TypeData::Primitive(t)) => {
                s == t || (s.is_nullish() && t.is_nullish())
            }
            (TypeData::Array(s), TypeData::Array(t)) => self.is_assignable(s, t),
            (TypeData::Function(s), TypeData::Function(t)) => self.function_assignable(&s, &t),
            (TypeData::Instance(s), TypeData::Instance(t))
            | (TypeData::Class(s), TypeData::Class(t)) => {
                is_derived_from(self.interner, s, t) || self.classes_equal(s, t)
            }
            (TypeData::Object(s), TypeData::Object(t)) => {
                let props: Vec<(Atom, TypeId, bool)> = s
                    .properties
                    .iter()
                    .map(|p| (p.name, p.type_id, p.optional))
                    .collect();
                self.members_satisfy(&props, &t)
            }
            (TypeData::Instance(class), TypeData::Object(t)) => {
                let props = members_as_required(inherited_instance_members(self.interner, class));
                self.members_satisfy(&props, &t)
            }
            (TypeData::Class(class), TypeData::Object(t)) => {
                let props = members_as_required(inherited_static_members(self.interner, class));
                self.members_satisfy(&props, &t)
            }
            (TypeData::Array(_) | TypeData::Function(_), TypeData::Object(t)) => {
                t.properties.is_empty()
            }
            _ => false,
        }
    }

    fn function_assignable(&mut self, source: &FunctionShape, target: &FunctionShape) -> bool {
        let target_arity = if target.rest_param().is_some() {
            usize::MAX
        } else {
            target.params.len()
        };
        if source.required_param_count() > target_arity {
            return false;
        }

        let shared = source.params.len().min(target.params.len());
        for i in 0..shared {
            let source_param = &source.params[i];
            let target_param = &target.params[i];
            let (s, t) = if source_param.rest == target_param.rest {
                (source_param.type_id, target_param.type_id)
            } else {
                (
                    self.rest_element(source_param),
                    self.rest_element(target_param),
                )
            };
            // Contravariant: the target's parameter must fit the source's.
            if !self.is_assignable(t, s) {
                return false;
            }
        }

        target.return_type == TypeId::VOID
            || self.is_assignable(source.return_type, target.return_type)
    }

    fn rest_element(&self, param: &ParamInfo) -> TypeId {
        if param.rest {
            self.interner
                .array_element(param.type_id)
                .unwrap_or(TypeId::ANY)
        } else {
            param.type_id
        }
    }

    fn members_satisfy(&mut self, source: &[(Atom, TypeId, bool)], target: &ObjectShape) -> bool {
        target.properties.iter().all(|wanted| {
            match source.iter().find(|(name, _, _)| *name == wanted.name) {
                Some(&(_, type_id, optional)) => {
                    (!optional || wanted.optional) && self.is_assignable(type_id, wanted.type_id)
                }
                None => wanted.optional,
            }
        })
    }

    /// Replace a generic's parameters by their constraints (or `any`).
    fn erase_generic(&self, generic: &Arc<GenericShape>) -> TypeId {
        let mut subst = TypeSubstitution::new();
        for &param in &generic.type_params {
            if let Some(info) = self.interner.type_var_info(param) {
                subst.insert(info.name, info.constraint.unwrap_or(TypeId::ANY));
            }
        }
        instantiate_type(self.interner, generic.base, &subst)
    }

    fn guarded(&mut self, pair: (TypeId, TypeId), f: impl FnOnce(&mut Self) -> bool) -> bool {
        if self.in_progress.contains(&pair) {
            return true;
        }
        if self.depth >= MAX_RELATION_DEPTH {
            return false;
        }
        self.in_progress.insert(pair);
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.in_progress.remove(&pair);
        result
    }
}

fn members_as_required(members: Vec<(Atom, TypeId)>) -> Vec<(Atom, TypeId, bool)> {
    members
        .into_iter()
        .map(|(name, ty)| (name, ty, false))
        .collect()
}

/// Structural equality of two types.
pub fn types_equal(interner: &TypeInterner, a: TypeId, b: TypeId) -> bool {
    a == b || SubtypeChecker::new(interner).equals(a, b)
}

/// Is `source` assignable to `target`?
pub fn is_assignable_to(interner: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    SubtypeChecker::new(interner).is_assignable(source, target)
}

/// Assignability against a possibly missing target; a missing target is never satisfied.
pub fn is_assignable_to_opt(
    interner: &TypeInterner,
    source: TypeId,
    target: Option<TypeId>,
) -> bool {
    target.is_some_and(|target| is_assignable_to(interner, source, target))
}

#[cfg(test)]
#[path = "../tests/relation_tests.rs"]
mod tests;
