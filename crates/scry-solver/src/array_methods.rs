//! Built-in `Array` method signatures.
//!
//! There is no generic class model for `Array<T>`, so the element-dependent
//! signatures of the built-in methods are hard-coded here. Each entry records
//! how the result relates to the receiver's element type `T`, how many
//! arguments its callback takes, and a short variance note.

use crate::types::*;
use crate::TypeInterner;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrayMethodResult {
    /// `U[]` where `U` is the callback's return type.
    MappedArray,
    /// `T[]`.
    SameArray,
    /// `T | undefined`.
    ElementOrUndefined,
    Number,
    Boolean,
    String,
    Void,
    /// Initializer type if given, else the callback's return type.
    Accumulator,
    /// Callback return type unwrapped one array level, then wrapped.
    FlatMapped,
    /// Element type unwrapped one array level, then wrapped.
    Flattened,
    /// `number[]`.
    NumberArray,
    /// `[number, T][]`, approximated as `(number | T)[][]`.
    Entries,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallbackShape {
    None,
    /// `(value: T, index: number, array: T[])`
    Element,
    /// `(accumulator: A, value: T, index: number, array: T[])`
    Reducer,
    /// `(a: T, b: T)`
    Comparator,
}

#[derive(Clone, Debug)]
pub struct ArrayMethodSignature {
    pub name: &'static str,
    pub callback: CallbackShape,
    pub result: ArrayMethodResult,
    /// `length` is a property, not a method.
    pub is_property: bool,
    pub variance: &'static str,
}

const fn method(
    name: &'static str,
    callback: CallbackShape,
    result: ArrayMethodResult,
    variance: &'static str,
) -> ArrayMethodSignature {
    ArrayMethodSignature {
        name,
        callback,
        result,
        is_property: false,
        variance,
    }
}

use ArrayMethodResult as R;
use CallbackShape as C;

static ARRAY_METHODS: &[ArrayMethodSignature] = &[
    ArrayMethodSignature {
        name: "length",
        callback: C::None,
        result: R::Number,
        is_property: true,
        variance: "always number",
    },
    method("map", C::Element, R::MappedArray, "result element is the callback return"),
    method("filter", C::Element, R::SameArray, "preserves the element type exactly"),
    method("find", C::Element, R::ElementOrUndefined, "element or undefined"),
    method("findIndex", C::Element, R::Number, "index, -1 when absent"),
    method("indexOf", C::None, R::Number, "index, -1 when absent"),
    method("lastIndexOf", C::None, R::Number, "index, -1 when absent"),
    method("some", C::Element, R::Boolean, "predicate result"),
    method("every", C::Element, R::Boolean, "predicate result"),
    method("includes", C::None, R::Boolean, "membership"),
    method("reduce", C::Reducer, R::Accumulator, "accumulator from initializer, else callback return"),
    method("reduceRight", C::Reducer, R::Accumulator, "accumulator from initializer, else callback return"),
    method("forEach", C::Element, R::Void, "callback result is discarded"),
    method("flatMap", C::Element, R::FlatMapped, "callback return flattened one level"),
    method("flat", C::None, R::Flattened, "element flattened one level"),
    method("concat", C::None, R::SameArray, "preserves the element type"),
    method("slice", C::None, R::SameArray, "preserves the element type"),
    method("reverse", C::None, R::SameArray, "in place, same array"),
    method("sort", C::Comparator, R::SameArray, "in place, same array"),
    method("fill", C::None, R::SameArray, "in place, same array"),
    method("splice", C::None, R::SameArray, "removed elements"),
    method("join", C::None, R::String, "always string"),
    method("push", C::None, R::Number, "new length"),
    method("unshift", C::None, R::Number, "new length"),
    method("pop", C::None, R::ElementOrUndefined, "undefined when empty"),
    method("shift", C::None, R::ElementOrUndefined, "undefined when empty"),
    method("at", C::None, R::ElementOrUndefined, "undefined when out of range"),
    method("keys", C::None, R::NumberArray, "indices"),
    method("entries", C::None, R::Entries, "index/value pairs"),
    method("values", C::None, R::SameArray, "elements"),
];

static ARRAY_METHOD_INDEX: Lazy<FxHashMap<&'static str, usize>> = Lazy::new(|| {
    ARRAY_METHODS
        .iter()
        .enumerate()
        .map(|(i, sig)| (sig.name, i))
        .collect()
});

pub fn lookup_array_method(name: &str) -> Option<&'static ArrayMethodSignature> {
    ARRAY_METHOD_INDEX.get(name).map(|&i| &ARRAY_METHODS[i])
}

/// All entries in table order.
pub fn array_methods() -> &'static [ArrayMethodSignature] {
    ARRAY_METHODS
}

/// Parameter types the callback of `sig` receives for an array of `element`.
/// `accumulator` is the initializer type for reducers.
pub fn callback_parameter_types(
    interner: &TypeInterner,
    sig: &ArrayMethodSignature,
    element: TypeId,
    accumulator: Option<TypeId>,
) -> Vec<TypeId> {
    let array = interner.array(element);
    match sig.callback {
        CallbackShape::None => Vec::new(),
        CallbackShape::Element => vec![element, TypeId::NUMBER, array],
        CallbackShape::Reducer => vec![
            accumulator.unwrap_or(element),
            element,
            TypeId::NUMBER,
            array,
        ],
        CallbackShape::Comparator => vec![element, element],
    }
}

/// Result type of calling `sig` on an array of `element`.
pub fn array_method_return_type(
    interner: &TypeInterner,
    sig: &ArrayMethodSignature,
    element: TypeId,
    callback_return: Option<TypeId>,
    initializer: Option<TypeId>,
) -> TypeId {
    match sig.result {
        R::MappedArray => interner.array(callback_return.unwrap_or(TypeId::ANY)),
        R::SameArray => interner.array(element),
        R::ElementOrUndefined => interner.union2(element, TypeId::UNDEFINED),
        R::Number => TypeId::NUMBER,
        R::Boolean => TypeId::BOOLEAN,
        R::String => TypeId::STRING,
        R::Void => TypeId::VOID,
        R::Accumulator => initializer.or(callback_return).unwrap_or(element),
        R::FlatMapped => {
            let produced = callback_return.unwrap_or(TypeId::ANY);
            interner.array(flatten_once(interner, produced))
        }
        R::Flattened => interner.array(flatten_once(interner, element)),
        R::NumberArray => interner.array(TypeId::NUMBER),
        R::Entries => {
            let pair = interner.array(interner.union2(TypeId::NUMBER, element));
            interner.array(pair)
        }
    }
}

/// The member type of `sig` on an array of `element`, as shown in
/// completions and hover. Callback results are `any`.
pub fn array_method_type(interner: &TypeInterner, sig: &ArrayMethodSignature, element: TypeId) -> TypeId {
    if sig.is_property {
        return array_method_return_type(interner, sig, element, None, None);
    }
    let mut params = Vec::new();
    let callback_params = callback_parameter_types(interner, sig, element, None);
    if !callback_params.is_empty() {
        let names: &[&str] = match sig.callback {
            CallbackShape::Reducer => &["accumulator", "value", "index", "array"],
            CallbackShape::Comparator => &["a", "b"],
            _ => &["value", "index", "array"],
        };
        let callback = interner.function(FunctionShape::new(
            names
                .iter()
                .zip(callback_params)
                .map(|(name, ty)| ParamInfo::required(interner.intern_string(name), ty))
                .collect(),
            TypeId::ANY,
        ));
        params.push(ParamInfo::required(interner.intern_string("callback"), callback));
        if sig.callback == CallbackShape::Reducer {
            params.push(ParamInfo::optional(
                interner.intern_string("initialValue"),
                TypeId::ANY,
            ));
        }
    } else {
        match sig.name {
            "indexOf" | "lastIndexOf" | "includes" => {
                params.push(ParamInfo::required(interner.intern_string("value"), element));
            }
            "push" | "unshift" | "concat" => {
                params.push(ParamInfo::rest(
                    interner.intern_string("items"),
                    interner.array(element),
                ));
            }
            "join" => {
                params.push(ParamInfo::optional(
                    interner.intern_string("separator"),
                    TypeId::STRING,
                ));
            }
            "at" => {
                params.push(ParamInfo::required(interner.intern_string("index"), TypeId::NUMBER));
            }
            _ => {}
        }
    }
    let result = match sig.result {
        R::MappedArray | R::FlatMapped => interner.array(TypeId::ANY),
        R::Accumulator => TypeId::ANY,
        _ => array_method_return_type(interner, sig, element, None, None),
    };
    interner.function(FunctionShape::new(params, result))
}

fn flatten_once(interner: &TypeInterner, ty: TypeId) -> TypeId {
    let members: Vec<TypeId> = interner
        .union_members(ty)
        .into_iter()
        .map(|member| interner.array_element(member).unwrap_or(member))
        .collect();
    interner.union(members)
}

#[cfg(test)]
#[path = "../tests/array_methods_tests.rs"]
mod tests;
