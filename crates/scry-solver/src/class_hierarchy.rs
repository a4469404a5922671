//! Class hierarchy construction and queries.
//!
//! Class bodies are stored in the interner and extended while the checker
//! walks the class. Inheritance is single (`extends`). Chain walks are
//! bounded by `MAX_SUPERCLASS_CHAIN` and stop on a repeated class, so an
//! accidental cycle degrades to a truncated chain.

use crate::types::*;
use crate::TypeInterner;
use indexmap::IndexMap;
use scry_common::limits::MAX_SUPERCLASS_CHAIN;
use scry_common::Atom;
use tracing::debug;

/// Builder for a class body being analysed.
///
/// This is a pure type computation; it knows nothing about AST nodes.
pub struct ClassTypeBuilder<'a> {
    interner: &'a TypeInterner,
    class: ClassId,
}

impl<'a> ClassTypeBuilder<'a> {
    /// Declare a new class. A superclass that would close a cycle is dropped.
    pub fn declare(interner: &'a TypeInterner, name: &str, super_class: Option<ClassId>) -> Self {
        let class = interner.declare_class(name, None);
        let builder = ClassTypeBuilder { interner, class };
        if let Some(base) = super_class {
            builder.set_super_class(base);
        }
        builder
    }

    /// Resume building an existing class.
    pub fn resume(interner: &'a TypeInterner, class: ClassId) -> Self {
        ClassTypeBuilder { interner, class }
    }

    pub fn id(&self) -> ClassId {
        self.class
    }

    pub fn class_type(&self) -> TypeId {
        self.interner.class_type(self.class)
    }

    pub fn instance_type(&self) -> TypeId {
        self.interner.instance_type(self.class)
    }

    /// Returns `false` (and leaves the class unchanged) if `base` would
    /// close an inheritance cycle.
    pub fn set_super_class(&self, base: ClassId) -> bool {
        if would_create_inheritance_cycle(self.interner, self.class, base) {
            debug!(class = self.class.0, base = base.0, "rejecting cyclic superclass");
            return false;
        }
        self.interner.set_super_class(self.class, Some(base));
        true
    }

    pub fn add_method(&self, name: &str, method: TypeId) {
        let name = self.interner.intern_string(name);
        self.interner.add_instance_member(self.class, name, method);
    }

    pub fn add_property(&self, name: &str, type_id: TypeId) {
        let name = self.interner.intern_string(name);
        self.interner.add_instance_member(self.class, name, type_id);
    }

    pub fn add_static(&self, name: &str, type_id: TypeId) {
        let name = self.interner.intern_string(name);
        self.interner.add_static_member(self.class, name, type_id);
    }

    /// Add an instance property only if neither this class nor an ancestor
    /// declares it yet. Used for `this.x = ...` assignments.
    pub fn add_property_if_absent(&self, name: &str, type_id: TypeId) -> bool {
        let atom = self.interner.intern_string(name);
        if find_instance_member(self.interner, self.class, atom).is_some() {
            return false;
        }
        self.interner.add_instance_member(self.class, atom, type_id);
        true
    }

    /// Record the constructor signature. The stored type returns the
    /// instance type.
    pub fn set_constructor(&self, params: Vec<ParamInfo>) -> TypeId {
        let ctor = self
            .interner
            .function(FunctionShape::new(params, self.instance_type()));
        self.interner.set_constructor_type(self.class, ctor);
        ctor
    }
}

/// The class followed by its ancestors, nearest first.
pub fn superclass_chain(interner: &TypeInterner, class: ClassId) -> Vec<ClassId> {
    let mut chain = vec![class];
    let mut current = interner.super_class(class);
    while let Some(next) = current {
        if chain.contains(&next) || chain.len() >= MAX_SUPERCLASS_CHAIN {
            break;
        }
        chain.push(next);
        current = interner.super_class(next);
    }
    chain
}

/// `derived` is `base` or inherits from it.
pub fn is_derived_from(interner: &TypeInterner, derived: ClassId, base: ClassId) -> bool {
    superclass_chain(interner, derived).contains(&base)
}

/// Would making `base` the superclass of `class` create a cycle?
pub fn would_create_inheritance_cycle(interner: &TypeInterner, class: ClassId, base: ClassId) -> bool {
    is_derived_from(interner, base, class)
}

/// Instance member lookup along the inheritance chain.
pub fn find_instance_member(interner: &TypeInterner, class: ClassId, name: Atom) -> Option<TypeId> {
    superclass_chain(interner, class)
        .into_iter()
        .find_map(|c| interner.own_instance_member(c, name))
}

/// Static member lookup along the inheritance chain.
pub fn find_static_member(interner: &TypeInterner, class: ClassId, name: Atom) -> Option<TypeId> {
    superclass_chain(interner, class)
        .into_iter()
        .find_map(|c| interner.own_static_member(c, name))
}

/// All instance members, own first, then inherited ones not overridden.
pub fn inherited_instance_members(interner: &TypeInterner, class: ClassId) -> Vec<(Atom, TypeId)> {
    merge_chain(interner, class, |def| &def.instance_members)
}

/// All static members, own first, then inherited ones not overridden.
pub fn inherited_static_members(interner: &TypeInterner, class: ClassId) -> Vec<(Atom, TypeId)> {
    merge_chain(interner, class, |def| &def.static_members)
}

fn merge_chain(
    interner: &TypeInterner,
    class: ClassId,
    members: impl Fn(&ClassDef) -> &IndexMap<Atom, TypeId>,
) -> Vec<(Atom, TypeId)> {
    let mut merged: IndexMap<Atom, TypeId> = IndexMap::new();
    for c in superclass_chain(interner, class) {
        let Some(def) = interner.class_def(c) else {
            continue;
        };
        for (&name, &ty) in members(&def) {
            merged.entry(name).or_insert(ty);
        }
    }
    merged.into_iter().collect()
}

#[cfg(test)]
#[path = "../tests/class_hierarchy_tests.rs"]
mod tests;
