//! Type interning for structural deduplication.
//!
//! Converts `TypeData` structures into lightweight `TypeId` handles:
//! - structurally identical types get the same id, so most equality checks
//!   are a `u32` comparison
//! - each unique structure is stored once
//!
//! The interner is per-document state. It uses interior mutability so that
//! the whole engine can share `&TypeInterner`; it is deliberately `!Sync`.

use crate::instantiate::TypeSubstitution;
use crate::types::*;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use scry_common::{Atom, Interner};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use tracing::trace;

const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

/// Memo key for a generic or callee applied to an argument tuple. Interned
/// ids are injective, so two distinct argument types never share an entry.
type ArgsKey = (TypeId, TypeListBuffer);

fn args_key(head: TypeId, args: &[TypeId]) -> ArgsKey {
    (head, args.iter().copied().collect())
}

pub struct TypeInterner {
    strings: RefCell<Interner>,
    types: RefCell<Vec<TypeData>>,
    ids: RefCell<FxHashMap<TypeData, TypeId>>,
    classes: RefCell<Vec<ClassDef>>,
    primitive_members: RefCell<FxHashMap<PrimitiveKind, IndexMap<Atom, TypeId>>>,
    next_type_var: Cell<u32>,
    /// `Generic` instantiations keyed by (generic, argument ids).
    generic_instances: RefCell<FxHashMap<ArgsKey, TypeId>>,
    /// Call-site inference results keyed by (callee, argument ids).
    call_bindings: RefCell<FxHashMap<ArgsKey, TypeSubstitution>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            strings: RefCell::new(Interner::new()),
            types: RefCell::new(Vec::with_capacity(64)),
            ids: RefCell::new(FxHashMap::default()),
            classes: RefCell::new(Vec::new()),
            primitive_members: RefCell::new(FxHashMap::default()),
            next_type_var: Cell::new(0),
            generic_instances: RefCell::new(FxHashMap::default()),
            call_bindings: RefCell::new(FxHashMap::default()),
        };

        // Order must match the `TypeId` constants.
        let intrinsics = [
            TypeData::Any,
            TypeData::Unknown,
            TypeData::Never,
            TypeData::Void,
            TypeData::Primitive(PrimitiveKind::String),
            TypeData::Primitive(PrimitiveKind::Number),
            TypeData::Primitive(PrimitiveKind::Boolean),
            TypeData::Primitive(PrimitiveKind::Null),
            TypeData::Primitive(PrimitiveKind::Undefined),
            TypeData::Primitive(PrimitiveKind::Symbol),
            TypeData::Primitive(PrimitiveKind::BigInt),
        ];
        for data in intrinsics {
            interner.intern(data);
        }
        debug_assert_eq!(interner.len() as u32, TypeId::FIRST_USER);
        interner
    }

    // =========================================================================
    // Core interning
    // =========================================================================

    /// Intern a type structure, returning the existing id when it was seen before.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.ids.borrow().get(&data) {
            return id;
        }
        let mut types = self.types.borrow_mut();
        let id = TypeId(types.len() as u32);
        types.push(data.clone());
        self.ids.borrow_mut().insert(data, id);
        id
    }

    /// Look up the structure of a type.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.borrow().get(id.0 as usize).cloned()
    }

    /// The variant tag of a type. Unknown ids report `Any`.
    pub fn kind(&self, id: TypeId) -> TypeKind {
        self.types
            .borrow()
            .get(id.0 as usize)
            .map_or(TypeKind::Any, TypeData::kind)
    }

    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Strings
    // =========================================================================

    pub fn intern_string(&self, text: &str) -> Atom {
        self.strings.borrow_mut().intern(text)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.strings.borrow().resolve(atom)
    }

    /// Look up an atom without interning it.
    pub fn find_atom(&self, text: &str) -> Option<Atom> {
        self.strings.borrow().get(text)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        self.intern(TypeData::Object(Arc::new(ObjectShape { properties })))
    }

    /// Object type from `(name, type)` pairs, all required.
    pub fn object_from_pairs(&self, pairs: &[(&str, TypeId)]) -> TypeId {
        let properties = pairs
            .iter()
            .map(|(name, ty)| PropertyInfo::new(self.intern_string(name), *ty))
            .collect();
        self.object(properties)
    }

    pub fn function(&self, shape: FunctionShape) -> TypeId {
        self.intern(TypeData::Function(Arc::new(shape)))
    }

    /// Function type from `(name, type)` pairs, all parameters required.
    pub fn simple_function(&self, params: &[(&str, TypeId)], return_type: TypeId) -> TypeId {
        let params = params
            .iter()
            .map(|(name, ty)| ParamInfo::required(self.intern_string(name), *ty))
            .collect();
        self.function(FunctionShape::new(params, return_type))
    }

    /// Create a fresh type variable. Every call yields a distinct type, even
    /// for a repeated name.
    pub fn type_variable(&self, name: &str, constraint: Option<TypeId>) -> TypeId {
        let id = self.next_type_var.get();
        self.next_type_var.set(id + 1);
        let name = self.intern_string(name);
        self.intern(TypeData::TypeVariable(TypeVarInfo {
            name,
            constraint,
            id,
        }))
    }

    pub fn generic(&self, base: TypeId, type_params: Vec<TypeId>) -> TypeId {
        if type_params.is_empty() {
            return base;
        }
        self.intern(TypeData::Generic(Arc::new(GenericShape { base, type_params })))
    }

    // =========================================================================
    // Unions
    // =========================================================================

    /// Intern a union type, flattening nested unions, dropping `never` and
    /// deduplicating members. Member order is first-occurrence order.
    ///
    /// - no members: `never`
    /// - one distinct member: that member
    /// - any member `any`: `any`; otherwise any member `unknown`: `unknown`
    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        self.union_from_iter(members)
    }

    pub fn union2(&self, left: TypeId, right: TypeId) -> TypeId {
        self.union_from_iter([left, right])
    }

    fn union_from_iter<I>(&self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut flat: TypeListBuffer = SmallVec::new();
        for member in members {
            self.push_union_member(&mut flat, member);
        }
        self.normalize_union(flat)
    }

    fn push_union_member(&self, flat: &mut TypeListBuffer, member: TypeId) {
        if let Some(TypeData::Union(inner)) = self.lookup(member) {
            for &inner_member in inner.iter() {
                self.push_union_member(flat, inner_member);
            }
        } else if member != TypeId::NEVER && !flat.contains(&member) {
            flat.push(member);
        }
    }

    fn normalize_union(&self, mut flat: TypeListBuffer) -> TypeId {
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }

        // Interning already merged identical structures; classes are stored by
        // id, so structurally identical class bodies need a relation check.
        let mut i = 0;
        while i < flat.len() {
            let candidate = flat[i];
            let duplicate = flat[..i]
                .iter()
                .any(|&earlier| crate::relation::types_equal(self, earlier, candidate));
            if duplicate {
                flat.remove(i);
            } else {
                i += 1;
            }
        }

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => {
                let members: Arc<[TypeId]> = flat.into_vec().into();
                self.intern(TypeData::Union(members))
            }
        }
    }

    /// Members of a union, or the type itself for non-unions.
    pub fn union_members(&self, id: TypeId) -> Vec<TypeId> {
        match self.lookup(id) {
            Some(TypeData::Union(members)) => members.to_vec(),
            _ => vec![id],
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Register a new class body and return its id.
    pub fn declare_class(&self, name: &str, super_class: Option<ClassId>) -> ClassId {
        let name = self.intern_string(name);
        let mut classes = self.classes.borrow_mut();
        let id = ClassId(classes.len() as u32);
        classes.push(ClassDef::new(name, super_class));
        trace!(class_id = id.0, "declared class");
        id
    }

    /// The class value type (`typeof C`).
    pub fn class_type(&self, class: ClassId) -> TypeId {
        self.intern(TypeData::Class(class))
    }

    /// The instance type (`C`).
    pub fn instance_type(&self, class: ClassId) -> TypeId {
        self.intern(TypeData::Instance(class))
    }

    /// Snapshot of a class body.
    pub fn class_def(&self, class: ClassId) -> Option<ClassDef> {
        self.classes.borrow().get(class.0 as usize).cloned()
    }

    pub fn class_name(&self, class: ClassId) -> Option<Arc<str>> {
        let name = self.classes.borrow().get(class.0 as usize)?.name;
        Some(self.resolve_atom(name))
    }

    pub fn super_class(&self, class: ClassId) -> Option<ClassId> {
        self.classes.borrow().get(class.0 as usize)?.super_class
    }

    /// Set the superclass. Callers are responsible for rejecting cycles
    /// (see `would_create_inheritance_cycle`).
    pub fn set_super_class(&self, class: ClassId, super_class: Option<ClassId>) {
        if let Some(def) = self.classes.borrow_mut().get_mut(class.0 as usize) {
            def.super_class = super_class;
        }
    }

    pub fn add_instance_member(&self, class: ClassId, name: Atom, type_id: TypeId) {
        if let Some(def) = self.classes.borrow_mut().get_mut(class.0 as usize) {
            def.instance_members.insert(name, type_id);
        }
    }

    pub fn add_static_member(&self, class: ClassId, name: Atom, type_id: TypeId) {
        if let Some(def) = self.classes.borrow_mut().get_mut(class.0 as usize) {
            def.static_members.insert(name, type_id);
        }
    }

    pub fn set_constructor_type(&self, class: ClassId, type_id: TypeId) {
        if let Some(def) = self.classes.borrow_mut().get_mut(class.0 as usize) {
            def.constructor_type = Some(type_id);
        }
    }

    /// Own (non-inherited) instance member.
    pub fn own_instance_member(&self, class: ClassId, name: Atom) -> Option<TypeId> {
        self.classes
            .borrow()
            .get(class.0 as usize)?
            .instance_members
            .get(&name)
            .copied()
    }

    /// Own (non-inherited) static member.
    pub fn own_static_member(&self, class: ClassId, name: Atom) -> Option<TypeId> {
        self.classes
            .borrow()
            .get(class.0 as usize)?
            .static_members
            .get(&name)
            .copied()
    }

    pub fn class_count(&self) -> usize {
        self.classes.borrow().len()
    }

    // =========================================================================
    // Primitive members
    // =========================================================================

    /// Register a member on a primitive (e.g. `string.length`). The member
    /// map is populated by the host environment, not by the solver.
    pub fn set_primitive_member(&self, kind: PrimitiveKind, name: &str, type_id: TypeId) {
        let name = self.intern_string(name);
        self.primitive_members
            .borrow_mut()
            .entry(kind)
            .or_default()
            .insert(name, type_id);
    }

    pub fn primitive_member(&self, kind: PrimitiveKind, name: Atom) -> Option<TypeId> {
        self.primitive_members
            .borrow()
            .get(&kind)?
            .get(&name)
            .copied()
    }

    pub fn primitive_members(&self, kind: PrimitiveKind) -> Vec<(Atom, TypeId)> {
        self.primitive_members
            .borrow()
            .get(&kind)
            .map(|members| members.iter().map(|(&k, &v)| (k, v)).collect())
            .unwrap_or_default()
    }

    // =========================================================================
    // Memoisation
    // =========================================================================

    pub(crate) fn cached_generic_instance(&self, generic: TypeId, args: &[TypeId]) -> Option<TypeId> {
        self.generic_instances
            .borrow()
            .get(&args_key(generic, args))
            .copied()
    }

    pub(crate) fn cache_generic_instance(&self, generic: TypeId, args: &[TypeId], instance: TypeId) {
        self.generic_instances
            .borrow_mut()
            .insert(args_key(generic, args), instance);
    }

    pub(crate) fn cached_call_bindings(
        &self,
        callee: TypeId,
        args: &[TypeId],
    ) -> Option<TypeSubstitution> {
        self.call_bindings
            .borrow()
            .get(&args_key(callee, args))
            .cloned()
    }

    pub(crate) fn cache_call_bindings(
        &self,
        callee: TypeId,
        args: &[TypeId],
        bindings: TypeSubstitution,
    ) {
        self.call_bindings
            .borrow_mut()
            .insert(args_key(callee, args), bindings);
    }

    // =========================================================================
    // Convenience queries
    // =========================================================================

    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)? {
            TypeData::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn function_shape(&self, id: TypeId) -> Option<Arc<FunctionShape>> {
        match self.lookup(id)? {
            TypeData::Function(shape) => Some(shape),
            TypeData::Generic(generic) => self.function_shape(generic.base),
            _ => None,
        }
    }

    pub fn object_shape(&self, id: TypeId) -> Option<Arc<ObjectShape>> {
        match self.lookup(id)? {
            TypeData::Object(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn type_var_info(&self, id: TypeId) -> Option<TypeVarInfo> {
        match self.lookup(id)? {
            TypeData::TypeVariable(info) => Some(info),
            _ => None,
        }
    }

    /// The class behind a `Class` or `Instance` type.
    pub fn class_of(&self, id: TypeId) -> Option<ClassId> {
        match self.lookup(id)? {
            TypeData::Class(class) | TypeData::Instance(class) => Some(class),
            _ => None,
        }
    }

    /// Display a type. See [`TypeFormatter`](crate::TypeFormatter).
    pub fn display(&self, id: TypeId) -> String {
        crate::format::TypeFormatter::new(self).format(id)
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
