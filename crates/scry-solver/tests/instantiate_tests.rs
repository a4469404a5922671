use super::*;
use crate::ClassTypeBuilder;

fn bind(interner: &TypeInterner, pairs: &[(&str, TypeId)]) -> TypeSubstitution {
    pairs
        .iter()
        .map(|(name, ty)| (interner.intern_string(name), *ty))
        .collect()
}

#[test]
fn test_substitute_type_variable() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let subst = bind(&interner, &[("T", TypeId::NUMBER)]);
    assert_eq!(instantiate_type(&interner, t, &subst), TypeId::NUMBER);
}

#[test]
fn test_substitute_is_noop_when_unchanged() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let func = interner.simple_function(&[("x", t)], interner.array(t));
    let unrelated = bind(&interner, &[("U", TypeId::STRING)]);
    assert_eq!(instantiate_type(&interner, func, &unrelated), func);
    assert_eq!(
        instantiate_type(&interner, func, &TypeSubstitution::new()),
        func
    );
}

#[test]
fn test_substitute_recurses_into_composites() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let obj = interner.object_from_pairs(&[("items", interner.array(t))]);
    let func = interner.simple_function(&[("x", t)], obj);
    let subst = bind(&interner, &[("T", TypeId::STRING)]);

    let result = instantiate_type(&interner, func, &subst);
    assert_eq!(interner.display(result), "(x: string) => { items: string[] }");
}

#[test]
fn test_substitute_renormalizes_unions() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let union = interner.union2(t, TypeId::STRING);
    let subst = bind(&interner, &[("T", TypeId::STRING)]);
    assert_eq!(instantiate_type(&interner, union, &subst), TypeId::STRING);
}

#[test]
fn test_classes_are_left_alone() {
    let interner = TypeInterner::new();
    let class = interner.declare_class("Box", None);
    let instance = interner.instance_type(class);
    let subst = bind(&interner, &[("T", TypeId::STRING)]);
    assert_eq!(instantiate_type(&interner, instance, &subst), instance);
}

#[test]
fn test_generic_parameters_shadow_outer_bindings() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let identity = interner.simple_function(&[("x", t)], t);
    let generic = interner.generic(identity, vec![t]);
    let subst = bind(&interner, &[("T", TypeId::NUMBER)]);
    assert_eq!(instantiate_type(&interner, generic, &subst), generic);
}

#[test]
fn test_collect_type_variables_dedupes_by_name() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let u = interner.type_variable("U", None);
    let func = interner.simple_function(&[("a", t), ("b", u), ("c", t)], interner.array(u));
    assert_eq!(collect_type_variables(&interner, func), vec![t, u]);
    assert!(collect_type_variables(&interner, TypeId::NUMBER).is_empty());
}

#[test]
fn test_collect_skips_bound_generic_parameters() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let identity = interner.generic(interner.simple_function(&[("x", t)], t), vec![t]);
    assert!(collect_type_variables(&interner, identity).is_empty());
}

#[test]
fn test_resolve_completely() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let u = interner.type_variable("U", None);
    let pair = interner.object_from_pairs(&[("first", t), ("second", u)]);

    let partial = bind(&interner, &[("T", TypeId::NUMBER)]);
    let err = resolve_completely(&interner, pair, &partial).expect_err("U is free");
    assert_eq!(err.names, vec!["U".to_string()]);
    assert_eq!(err.to_string(), "unresolved type variables: U");

    let full = bind(&interner, &[("T", TypeId::NUMBER), ("U", TypeId::STRING)]);
    let resolved = resolve_completely(&interner, pair, &full).expect("all bound");
    assert_eq!(interner.display(resolved), "{ first: number; second: string }");
}

#[test]
fn test_instantiate_generic_is_cached() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let boxed = interner.generic(interner.object_from_pairs(&[("value", t)]), vec![t]);

    let first = instantiate_generic(&interner, boxed, &[TypeId::STRING]);
    let second = instantiate_generic(&interner, boxed, &[TypeId::STRING]);
    assert_eq!(first, second);
    assert_eq!(interner.display(first), "{ value: string }");
}

#[test]
fn test_instantiate_generic_distinguishes_same_named_arguments() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let boxed = interner.generic(interner.array(t), vec![t]);
    let first = ClassTypeBuilder::declare(&interner, "Item", None);
    first.add_property("a", TypeId::NUMBER);
    let second = ClassTypeBuilder::declare(&interner, "Item", None);
    second.add_property("b", TypeId::STRING);

    let first_boxed = instantiate_generic(&interner, boxed, &[first.instance_type()]);
    let second_boxed = instantiate_generic(&interner, boxed, &[second.instance_type()]);
    assert_eq!(first_boxed, interner.array(first.instance_type()));
    assert_eq!(second_boxed, interner.array(second.instance_type()));
}

#[test]
fn test_instantiate_generic_defaults_missing_arguments() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", Some(TypeId::NUMBER));
    let boxed = interner.generic(interner.array(t), vec![t]);
    let result = instantiate_generic(&interner, boxed, &[]);
    assert_eq!(result, interner.array(TypeId::NUMBER));
}
