//! Property access and member completion over types.

use crate::array_methods::{array_method_type, array_methods, lookup_array_method};
use crate::class_hierarchy::{
    find_instance_member, find_static_member, inherited_instance_members, inherited_static_members,
};
use crate::types::*;
use crate::TypeInterner;
use scry_common::Atom;

/// A member offered for completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberEntry {
    pub name: Atom,
    pub type_id: TypeId,
}

/// Type of `ty.name`, or `None` when the member does not exist.
///
/// Property access on `any` is `any`. On a union the member must exist on
/// every member, and the result is the union of the member types.
pub fn get_property_type(interner: &TypeInterner, ty: TypeId, name: Atom) -> Option<TypeId> {
    match interner.lookup(ty)? {
        TypeData::Any => Some(TypeId::ANY),
        TypeData::Unknown | TypeData::Never | TypeData::Void => None,
        TypeData::Primitive(kind) => interner.primitive_member(kind, name),
        TypeData::Array(element) => {
            let text = interner.resolve_atom(name);
            let sig = lookup_array_method(&text)?;
            Some(array_method_type(interner, sig, element))
        }
        TypeData::Object(shape) => shape.property(name).map(|prop| prop.type_id),
        TypeData::Function(_) => function_member(interner, name),
        TypeData::Class(class) => find_static_member(interner, class, name),
        TypeData::Instance(class) => find_instance_member(interner, class, name),
        TypeData::Union(members) => {
            let mut found = Vec::with_capacity(members.len());
            for &member in members.iter() {
                found.push(get_property_type(interner, member, name)?);
            }
            Some(interner.union(found))
        }
        TypeData::TypeVariable(info) => {
            get_property_type(interner, info.constraint?, name)
        }
        TypeData::Generic(generic) => get_property_type(interner, generic.base, name),
    }
}

fn function_member(interner: &TypeInterner, name: Atom) -> Option<TypeId> {
    match &*interner.resolve_atom(name) {
        "length" => Some(TypeId::NUMBER),
        "name" => Some(TypeId::STRING),
        _ => None,
    }
}

/// Ordered members of a type for completion.
///
/// Instances list own members before inherited ones; arrays list the
/// built-in method table; unions offer only members common to every member.
pub fn get_completions(interner: &TypeInterner, ty: TypeId) -> Vec<MemberEntry> {
    let Some(data) = interner.lookup(ty) else {
        return Vec::new();
    };
    match data {
        TypeData::Any | TypeData::Unknown | TypeData::Never | TypeData::Void => Vec::new(),
        TypeData::Primitive(kind) => to_entries(interner.primitive_members(kind)),
        TypeData::Array(element) => array_methods()
            .iter()
            .map(|sig| MemberEntry {
                name: interner.intern_string(sig.name),
                type_id: array_method_type(interner, sig, element),
            })
            .collect(),
        TypeData::Object(shape) => shape
            .properties
            .iter()
            .map(|prop| MemberEntry {
                name: prop.name,
                type_id: prop.type_id,
            })
            .collect(),
        TypeData::Function(_) => ["length", "name"]
            .into_iter()
            .filter_map(|name| {
                let atom = interner.intern_string(name);
                function_member(interner, atom).map(|type_id| MemberEntry { name: atom, type_id })
            })
            .collect(),
        TypeData::Class(class) => to_entries(inherited_static_members(interner, class)),
        TypeData::Instance(class) => to_entries(inherited_instance_members(interner, class)),
        TypeData::Union(members) => {
            let Some((&first, rest)) = members.split_first() else {
                return Vec::new();
            };
            get_completions(interner, first)
                .into_iter()
                .filter(|entry| {
                    rest.iter()
                        .all(|&other| get_property_type(interner, other, entry.name).is_some())
                })
                .filter_map(|entry| {
                    get_property_type(interner, ty, entry.name).map(|type_id| MemberEntry {
                        name: entry.name,
                        type_id,
                    })
                })
                .collect()
        }
        TypeData::TypeVariable(info) => info
            .constraint
            .map(|constraint| get_completions(interner, constraint))
            .unwrap_or_default(),
        TypeData::Generic(generic) => get_completions(interner, generic.base),
    }
}

fn to_entries(members: Vec<(Atom, TypeId)>) -> Vec<MemberEntry> {
    members
        .into_iter()
        .map(|(name, type_id)| MemberEntry { name, type_id })
        .collect()
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
