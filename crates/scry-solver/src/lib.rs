//! Structural type solver.
//!
//! Types are hash-consed into a [`TypeInterner`] and handled as [`TypeId`]
//! values. On top of the type model this crate provides:
//!
//! - **Relations**: structural equality and assignability (`relation`)
//! - **Substitution**: type-variable replacement and generic instantiation
//! - **Inference**: binding type parameters from call-site argument types
//! - **Built-ins**: the element-dependent `Array` method table
//! - **Members**: property lookup and completion lists, walking class chains
//!
//! Everything here is best-effort and total: unsupported shapes degrade to
//! `any`/`unknown` rather than failing.

pub mod array_methods;
pub mod class_hierarchy;
mod format;
pub mod infer;
pub mod instantiate;
mod intern;
pub mod members;
pub mod relation;
pub mod types;

pub use array_methods::{
    ArrayMethodSignature, array_method_return_type, callback_parameter_types, lookup_array_method,
};
pub use class_hierarchy::{ClassTypeBuilder, is_derived_from, superclass_chain};
pub use format::TypeFormatter;
pub use infer::{InferenceContext, infer_type_arguments, instantiate_generic_call, unify_candidates};
pub use instantiate::{
    TypeSubstitution, Unresolved, collect_type_variables, instantiate_generic, instantiate_type,
    resolve_completely,
};
pub use intern::TypeInterner;
pub use members::{MemberEntry, get_completions, get_property_type};
pub use relation::{SubtypeChecker, is_assignable_to, is_assignable_to_opt, types_equal};
pub use types::{
    ClassDef, ClassId, FunctionShape, GenericShape, ObjectShape, ParamInfo, PrimitiveKind,
    PropertyInfo, TypeData, TypeId, TypeKind, TypeVarInfo,
};
