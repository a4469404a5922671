//! Type representation.
//!
//! Types are hash-consed by the [`TypeInterner`](crate::TypeInterner) and
//! handled as `TypeId` values. `TypeData` is the closed set of variants; every
//! recursive operation (equality, assignability, display, substitution) is an
//! exhaustive match over it.

use indexmap::IndexMap;
use scry_common::Atom;
use std::sync::Arc;

/// Handle to an interned type.
///
/// The intrinsic singletons occupy fixed ids so that identity comparison
/// against them is valid everywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NEVER: TypeId = TypeId(2);
    pub const VOID: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const NUMBER: TypeId = TypeId(5);
    pub const BOOLEAN: TypeId = TypeId(6);
    pub const NULL: TypeId = TypeId(7);
    pub const UNDEFINED: TypeId = TypeId(8);
    pub const SYMBOL: TypeId = TypeId(9);
    pub const BIGINT: TypeId = TypeId(10);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 11;

    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    /// `any` and `unknown` accept every type.
    #[must_use]
    pub const fn is_top(self) -> bool {
        self.0 == Self::ANY.0 || self.0 == Self::UNKNOWN.0
    }

    /// The primitive singleton for a primitive kind.
    #[must_use]
    pub const fn primitive(kind: PrimitiveKind) -> TypeId {
        match kind {
            PrimitiveKind::String => Self::STRING,
            PrimitiveKind::Number => Self::NUMBER,
            PrimitiveKind::Boolean => Self::BOOLEAN,
            PrimitiveKind::Null => Self::NULL,
            PrimitiveKind::Undefined => Self::UNDEFINED,
            PrimitiveKind::Symbol => Self::SYMBOL,
            PrimitiveKind::BigInt => Self::BIGINT,
        }
    }
}

/// Handle to a class body stored in the interner's class store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Symbol,
    BigInt,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        PrimitiveKind::String,
        PrimitiveKind::Number,
        PrimitiveKind::Boolean,
        PrimitiveKind::Null,
        PrimitiveKind::Undefined,
        PrimitiveKind::Symbol,
        PrimitiveKind::BigInt,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Symbol => "symbol",
            PrimitiveKind::BigInt => "bigint",
        }
    }

    /// `null` and `undefined`, which are mutually assignable.
    #[must_use]
    pub const fn is_nullish(self) -> bool {
        matches!(self, PrimitiveKind::Null | PrimitiveKind::Undefined)
    }
}

/// Discriminant of a type, for callers that only need the tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Any,
    Unknown,
    Never,
    Void,
    Primitive,
    Array,
    Object,
    Function,
    Class,
    Instance,
    Union,
    TypeVariable,
    Generic,
}

/// A named property of an object type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
}

impl PropertyInfo {
    #[must_use]
    pub const fn new(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: false,
        }
    }

    #[must_use]
    pub const fn optional(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: true,
        }
    }
}

/// Ordered property list of an object type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectShape {
    pub properties: Vec<PropertyInfo>,
}

impl ObjectShape {
    #[must_use]
    pub fn property(&self, name: Atom) -> Option<&PropertyInfo> {
        self.properties.iter().find(|prop| prop.name == name)
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamInfo {
    pub name: Atom,
    pub type_id: TypeId,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    #[must_use]
    pub const fn required(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: false,
            rest: false,
        }
    }

    #[must_use]
    pub const fn optional(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: true,
            rest: false,
        }
    }

    /// A rest parameter; `type_id` is the array type (`...xs: T[]`).
    #[must_use]
    pub const fn rest(name: Atom, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            optional: false,
            rest: true,
        }
    }

    /// Parameters that must be supplied by the caller.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.optional && !self.rest
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionShape {
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub is_async: bool,
    pub is_generator: bool,
}

impl FunctionShape {
    #[must_use]
    pub const fn new(params: Vec<ParamInfo>, return_type: TypeId) -> Self {
        Self {
            params,
            return_type,
            is_async: false,
            is_generator: false,
        }
    }

    #[must_use]
    pub fn required_param_count(&self) -> usize {
        self.params.iter().filter(|p| p.is_required()).count()
    }

    #[must_use]
    pub fn rest_param(&self) -> Option<&ParamInfo> {
        self.params.last().filter(|p| p.rest)
    }
}

/// A type variable. `id` is unique per interner, so two variables that share
/// a name are still distinct types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeVarInfo {
    pub name: Atom,
    pub constraint: Option<TypeId>,
    pub id: u32,
}

/// A type abstracted over type variables, e.g. `<T>(x: T) => T`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericShape {
    pub base: TypeId,
    /// `TypeVariable` type ids, in declaration order.
    pub type_params: Vec<TypeId>,
}

/// Class body. Lives in the interner's class store so members can be added
/// while analysis proceeds; `TypeData::Class`/`TypeData::Instance` refer to
/// it by `ClassId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub name: Atom,
    pub super_class: Option<ClassId>,
    pub static_members: IndexMap<Atom, TypeId>,
    pub instance_members: IndexMap<Atom, TypeId>,
    pub constructor_type: Option<TypeId>,
}

impl ClassDef {
    #[must_use]
    pub fn new(name: Atom, super_class: Option<ClassId>) -> Self {
        Self {
            name,
            super_class,
            static_members: IndexMap::new(),
            instance_members: IndexMap::new(),
            constructor_type: None,
        }
    }
}

/// The structural variants of a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Any,
    Unknown,
    Never,
    Void,
    Primitive(PrimitiveKind),
    Array(TypeId),
    Object(Arc<ObjectShape>),
    Function(Arc<FunctionShape>),
    /// The `new`-able class value; exposes static members.
    Class(ClassId),
    /// An object created by instantiating a class; exposes instance members.
    Instance(ClassId),
    /// Flattened, deduplicated, never containing `never`, at least two members.
    Union(Arc<[TypeId]>),
    TypeVariable(TypeVarInfo),
    Generic(Arc<GenericShape>),
}

impl TypeData {
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            TypeData::Any => TypeKind::Any,
            TypeData::Unknown => TypeKind::Unknown,
            TypeData::Never => TypeKind::Never,
            TypeData::Void => TypeKind::Void,
            TypeData::Primitive(_) => TypeKind::Primitive,
            TypeData::Array(_) => TypeKind::Array,
            TypeData::Object(_) => TypeKind::Object,
            TypeData::Function(_) => TypeKind::Function,
            TypeData::Class(_) => TypeKind::Class,
            TypeData::Instance(_) => TypeKind::Instance,
            TypeData::Union(_) => TypeKind::Union,
            TypeData::TypeVariable(_) => TypeKind::TypeVariable,
            TypeData::Generic(_) => TypeKind::Generic,
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
