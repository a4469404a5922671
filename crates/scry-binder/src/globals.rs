//! Host environment globals.
//!
//! A fixed table of the browser/runtime names every document can see
//! (`console`, `Math`, `Array`, `Promise`, `setTimeout`, `fetch`, ...) and
//! the members of the primitive types (`string.length`, ...).
//!
//! Parameter names in the table use a small notation: `name?` is optional
//! and `...name` is a rest parameter.

use crate::scope_manager::ScopeManager;
use crate::symbols::{DeclarationKind, Symbol, SymbolFlags, SymbolKind};
use scry_solver::{
    ClassTypeBuilder, FunctionShape, ParamInfo, PrimitiveKind, TypeId, TypeInterner,
};
use tracing::debug;

type ParamSpec<'a> = &'a [(&'a str, TypeId)];

fn param(interner: &TypeInterner, spec: &str, type_id: TypeId) -> ParamInfo {
    if let Some(name) = spec.strip_prefix("...") {
        ParamInfo::rest(interner.intern_string(name), type_id)
    } else if let Some(name) = spec.strip_suffix('?') {
        ParamInfo::optional(interner.intern_string(name), type_id)
    } else {
        ParamInfo::required(interner.intern_string(spec), type_id)
    }
}

/// Build a function type from the table notation.
fn sig(interner: &TypeInterner, params: ParamSpec<'_>, return_type: TypeId) -> TypeId {
    let params = params
        .iter()
        .map(|&(spec, ty)| param(interner, spec, ty))
        .collect();
    interner.function(FunctionShape::new(params, return_type))
}

/// Populate the global scope of `manager` and the primitive member maps of
/// `interner`.
pub fn seed_globals(manager: &mut ScopeManager, interner: &TypeInterner) {
    seed_primitive_members(interner);

    let any = TypeId::ANY;
    let number = TypeId::NUMBER;
    let string = TypeId::STRING;
    let boolean = TypeId::BOOLEAN;
    let void = TypeId::VOID;
    let any_array = interner.array(any);
    let string_array = interner.array(string);

    // Promise comes first; other entries return its instances.
    let promise = ClassTypeBuilder::declare(interner, "Promise", None);
    let promise_t = promise.instance_type();
    let callback = sig(interner, &[("value", any)], any);
    let reject_callback = sig(interner, &[("reason", any)], any);
    promise.add_method(
        "then",
        sig(interner, &[("onfulfilled?", callback), ("onrejected?", reject_callback)], promise_t),
    );
    promise.add_method("catch", sig(interner, &[("onrejected?", reject_callback)], promise_t));
    promise.add_method("finally", sig(interner, &[("onfinally?", sig(interner, &[], void))], promise_t));
    promise.add_static("resolve", sig(interner, &[("value?", any)], promise_t));
    promise.add_static("reject", sig(interner, &[("reason?", any)], promise_t));
    promise.add_static("all", sig(interner, &[("values", any_array)], promise_t));
    promise.add_static("race", sig(interner, &[("values", any_array)], promise_t));
    promise.set_constructor(vec![param(
        interner,
        "executor",
        sig(interner, &[("resolve", callback), ("reject", reject_callback)], void),
    )]);
    define_class(manager, interner, &promise, "Represents the completion of an asynchronous operation.");

    let array = ClassTypeBuilder::declare(interner, "Array", None);
    array.add_static("isArray", sig(interner, &[("value", any)], boolean));
    array.add_static("from", sig(interner, &[("items", any)], any_array));
    array.add_static("of", sig(interner, &[("...items", any_array)], any_array));
    array.set_constructor(vec![param(interner, "...items", any_array)]);
    define_class(manager, interner, &array, "Creates and manipulates arrays.");

    let error = ClassTypeBuilder::declare(interner, "Error", None);
    error.add_property("name", string);
    error.add_property("message", string);
    error.add_property("stack", string);
    error.set_constructor(vec![param(interner, "message?", string)]);
    define_class(manager, interner, &error, "Base class for runtime errors.");

    for name in ["TypeError", "RangeError", "SyntaxError"] {
        let derived = ClassTypeBuilder::declare(interner, name, Some(error.id()));
        derived.set_constructor(vec![param(interner, "message?", string)]);
        define_class(manager, interner, &derived, "");
    }

    let regexp = ClassTypeBuilder::declare(interner, "RegExp", None);
    regexp.add_property("source", string);
    regexp.add_property("flags", string);
    regexp.add_property("lastIndex", number);
    regexp.add_method("test", sig(interner, &[("string", string)], boolean));
    regexp.add_method("exec", sig(interner, &[("string", string)], any));
    regexp.set_constructor(vec![
        param(interner, "pattern", string),
        param(interner, "flags?", string),
    ]);
    define_class(manager, interner, &regexp, "Regular expression.");

    let date = ClassTypeBuilder::declare(interner, "Date", None);
    for method in ["getTime", "getFullYear", "getMonth", "getDate", "getDay", "getHours", "getMinutes", "getSeconds"] {
        date.add_method(method, sig(interner, &[], number));
    }
    date.add_method("toISOString", sig(interner, &[], string));
    date.add_method("toLocaleDateString", sig(interner, &[], string));
    date.add_static("now", sig(interner, &[], number));
    date.set_constructor(vec![param(interner, "value?", any)]);
    define_class(manager, interner, &date, "Dates and times.");

    let map = ClassTypeBuilder::declare(interner, "Map", None);
    map.add_property("size", number);
    map.add_method("get", sig(interner, &[("key", any)], any));
    map.add_method("set", sig(interner, &[("key", any), ("value", any)], map.instance_type()));
    map.add_method("has", sig(interner, &[("key", any)], boolean));
    map.add_method("delete", sig(interner, &[("key", any)], boolean));
    map.add_method("clear", sig(interner, &[], void));
    map.add_method("keys", sig(interner, &[], any));
    map.add_method("values", sig(interner, &[], any));
    map.add_method("forEach", sig(interner, &[("callback", sig(interner, &[("value", any), ("key", any)], void))], void));
    map.set_constructor(vec![param(interner, "entries?", any_array)]);
    define_class(manager, interner, &map, "Keyed collection.");

    let set = ClassTypeBuilder::declare(interner, "Set", None);
    set.add_property("size", number);
    set.add_method("add", sig(interner, &[("value", any)], set.instance_type()));
    set.add_method("has", sig(interner, &[("value", any)], boolean));
    set.add_method("delete", sig(interner, &[("value", any)], boolean));
    set.add_method("clear", sig(interner, &[], void));
    set.add_method("forEach", sig(interner, &[("callback", sig(interner, &[("value", any)], void))], void));
    set.set_constructor(vec![param(interner, "values?", any_array)]);
    define_class(manager, interner, &set, "Collection of unique values.");

    let log = sig(interner, &[("...data", any_array)], void);
    let console = interner.object_from_pairs(&[
        ("log", log),
        ("info", log),
        ("warn", log),
        ("error", log),
        ("debug", log),
        ("table", log),
    ]);
    define_builtin(manager, "console", console, "Debugging console.");

    let unary = sig(interner, &[("x", number)], number);
    let variadic = sig(interner, &[("...values", interner.array(number))], number);
    let math = interner.object_from_pairs(&[
        ("PI", number),
        ("E", number),
        ("abs", unary),
        ("ceil", unary),
        ("floor", unary),
        ("round", unary),
        ("sqrt", unary),
        ("sign", unary),
        ("trunc", unary),
        ("pow", sig(interner, &[("x", number), ("y", number)], number)),
        ("max", variadic),
        ("min", variadic),
        ("random", sig(interner, &[], number)),
    ]);
    define_builtin(manager, "Math", math, "Mathematical constants and functions.");

    let json = interner.object_from_pairs(&[
        ("parse", sig(interner, &[("text", string)], any)),
        ("stringify", sig(interner, &[("value", any), ("replacer?", any), ("space?", any)], string)),
    ]);
    define_builtin(manager, "JSON", json, "JSON parsing and serialization.");

    let object = interner.object_from_pairs(&[
        ("keys", sig(interner, &[("o", any)], string_array)),
        ("values", sig(interner, &[("o", any)], any_array)),
        ("entries", sig(interner, &[("o", any)], interner.array(any_array))),
        ("assign", sig(interner, &[("target", any), ("...sources", any_array)], any)),
        ("freeze", sig(interner, &[("o", any)], any)),
    ]);
    define_builtin(manager, "Object", object, "Object utilities.");

    let timer_callback = sig(interner, &[("...args", any_array)], void);
    let functions: [(&str, TypeId); 13] = [
        ("setTimeout", sig(interner, &[("handler", timer_callback), ("timeout?", number)], number)),
        ("setInterval", sig(interner, &[("handler", timer_callback), ("timeout?", number)], number)),
        ("clearTimeout", sig(interner, &[("id?", number)], void)),
        ("clearInterval", sig(interner, &[("id?", number)], void)),
        ("fetch", sig(interner, &[("input", string), ("init?", any)], promise_t)),
        ("parseInt", sig(interner, &[("string", string), ("radix?", number)], number)),
        ("parseFloat", sig(interner, &[("string", string)], number)),
        ("isNaN", sig(interner, &[("number", number)], boolean)),
        ("isFinite", sig(interner, &[("number", number)], boolean)),
        ("String", sig(interner, &[("value?", any)], string)),
        ("Number", sig(interner, &[("value?", any)], number)),
        ("Boolean", sig(interner, &[("value?", any)], boolean)),
        ("alert", sig(interner, &[("message?", any)], void)),
    ];
    for (name, type_id) in functions {
        manager.define(Symbol::new(name, SymbolKind::Function, type_id).with_flags(SymbolFlags::HOST));
    }

    let values: [(&str, TypeId); 6] = [
        ("undefined", TypeId::UNDEFINED),
        ("NaN", number),
        ("Infinity", number),
        ("globalThis", any),
        ("window", any),
        ("document", any),
    ];
    for (name, type_id) in values {
        manager.define(
            Symbol::variable(name, DeclarationKind::Const, type_id).with_flags(SymbolFlags::HOST),
        );
    }

    debug!(symbols = manager.all_scopes().map(|s| s.symbols.len()).sum::<usize>(), "seeded host globals");
}

fn define_builtin(manager: &mut ScopeManager, name: &str, type_id: TypeId, doc: &str) {
    manager.define(
        Symbol::new(name, SymbolKind::Builtin, type_id)
            .with_flags(SymbolFlags::HOST | SymbolFlags::READONLY)
            .with_documentation(doc),
    );
}

/// Define a host class and mirror its members as member symbols.
fn define_class(manager: &mut ScopeManager, interner: &TypeInterner, class: &ClassTypeBuilder<'_>, doc: &str) {
    let Some(def) = interner.class_def(class.id()) else {
        return;
    };
    let name = interner.resolve_atom(def.name);
    let mut symbol =
        Symbol::new(name.as_ref(), SymbolKind::Class, class.class_type()).with_flags(SymbolFlags::HOST);
    if !doc.is_empty() {
        symbol = symbol.with_documentation(doc);
    }
    let owner = manager.define(symbol);

    for (member, &type_id) in &def.instance_members {
        let kind = member_kind(interner, type_id);
        let member = interner.resolve_atom(*member);
        manager.add_member(owner, Symbol::new(member.as_ref(), kind, type_id));
    }
    for (member, &type_id) in &def.static_members {
        let kind = member_kind(interner, type_id);
        let member = interner.resolve_atom(*member);
        manager.add_member(
            owner,
            Symbol::new(member.as_ref(), kind, type_id).with_flags(SymbolFlags::STATIC),
        );
    }
}

fn member_kind(interner: &TypeInterner, type_id: TypeId) -> SymbolKind {
    if interner.function_shape(type_id).is_some() {
        SymbolKind::Method
    } else {
        SymbolKind::Property
    }
}

fn seed_primitive_members(interner: &TypeInterner) {
    let number = TypeId::NUMBER;
    let string = TypeId::STRING;
    let boolean = TypeId::BOOLEAN;
    let to_string = sig(interner, &[], string);

    let string_members: [(&str, TypeId); 22] = [
        ("length", number),
        ("charAt", sig(interner, &[("index", number)], string)),
        ("charCodeAt", sig(interner, &[("index", number)], number)),
        ("includes", sig(interner, &[("search", string)], boolean)),
        ("indexOf", sig(interner, &[("search", string)], number)),
        ("lastIndexOf", sig(interner, &[("search", string)], number)),
        ("startsWith", sig(interner, &[("search", string)], boolean)),
        ("endsWith", sig(interner, &[("search", string)], boolean)),
        ("slice", sig(interner, &[("start?", number), ("end?", number)], string)),
        ("substring", sig(interner, &[("start", number), ("end?", number)], string)),
        ("toUpperCase", to_string),
        ("toLowerCase", to_string),
        ("trim", to_string),
        ("trimStart", to_string),
        ("trimEnd", to_string),
        ("split", sig(interner, &[("separator", string)], interner.array(string))),
        ("replace", sig(interner, &[("pattern", TypeId::ANY), ("replacement", string)], string)),
        ("padStart", sig(interner, &[("length", number), ("fill?", string)], string)),
        ("padEnd", sig(interner, &[("length", number), ("fill?", string)], string)),
        ("repeat", sig(interner, &[("count", number)], string)),
        ("concat", sig(interner, &[("...strings", interner.array(string))], string)),
        ("match", sig(interner, &[("pattern", TypeId::ANY)], TypeId::ANY)),
    ];
    for (name, type_id) in string_members {
        interner.set_primitive_member(PrimitiveKind::String, name, type_id);
    }

    let number_members: [(&str, TypeId); 4] = [
        ("toFixed", sig(interner, &[("digits?", number)], string)),
        ("toPrecision", sig(interner, &[("precision?", number)], string)),
        ("toString", sig(interner, &[("radix?", number)], string)),
        ("valueOf", sig(interner, &[], number)),
    ];
    for (name, type_id) in number_members {
        interner.set_primitive_member(PrimitiveKind::Number, name, type_id);
    }

    interner.set_primitive_member(PrimitiveKind::Boolean, "toString", to_string);
    interner.set_primitive_member(PrimitiveKind::Boolean, "valueOf", sig(interner, &[], boolean));
    interner.set_primitive_member(PrimitiveKind::BigInt, "toString", to_string);
    interner.set_primitive_member(PrimitiveKind::Symbol, "description", string);
    interner.set_primitive_member(PrimitiveKind::Symbol, "toString", to_string);
}

#[cfg(test)]
#[path = "../tests/globals_tests.rs"]
mod tests;
