use super::*;
use crate::ClassTypeBuilder;

fn identity(interner: &TypeInterner) -> (TypeId, TypeId) {
    let t = interner.type_variable("T", None);
    let func = interner.simple_function(&[("x", t)], t);
    (interner.generic(func, vec![t]), t)
}

fn binding(interner: &TypeInterner, subst: &TypeSubstitution, name: &str) -> Option<TypeId> {
    subst.get(interner.intern_string(name))
}

#[test]
fn test_identity_binds_argument_type() {
    let interner = TypeInterner::new();
    let (func, t) = identity(&interner);
    let subst = infer_type_arguments(&interner, func, &[TypeId::NUMBER], &[t]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::NUMBER));
}

#[test]
fn test_repeated_slot_unifies_to_union() {
    let interner = TypeInterner::new();
    let (_, t) = identity(&interner);
    let mut ctx = InferenceContext::new(&interner, &[t]);
    ctx.infer_from(t, TypeId::NUMBER);
    ctx.infer_from(t, TypeId::STRING);
    let subst = ctx.finish();
    let bound = binding(&interner, &subst, "T").expect("bound");
    assert_eq!(interner.display(bound), "number | string");
}

#[test]
fn test_two_parameters_sharing_a_variable() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let pair = interner.simple_function(&[("a", t), ("b", t)], interner.array(t));
    let subst = infer_type_arguments(&interner, pair, &[TypeId::NUMBER, TypeId::STRING], &[t]);
    let bound = binding(&interner, &subst, "T").expect("bound");
    assert_eq!(interner.display(bound), "number | string");
}

#[test]
fn test_equal_candidates_do_not_widen() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let pair = interner.simple_function(&[("a", t), ("b", t)], t);
    let subst = infer_type_arguments(&interner, pair, &[TypeId::NUMBER, TypeId::NUMBER], &[t]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::NUMBER));
}

#[test]
fn test_array_and_function_positions() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let u = interner.type_variable("U", None);
    let callback = interner.simple_function(&[("value", t)], u);
    let map = interner.simple_function(
        &[("items", interner.array(t)), ("fn", callback)],
        interner.array(u),
    );

    let actual_callback = interner.simple_function(&[("value", TypeId::NUMBER)], TypeId::STRING);
    let subst = infer_type_arguments(
        &interner,
        map,
        &[interner.array(TypeId::NUMBER), actual_callback],
        &[t, u],
    );
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::NUMBER));
    assert_eq!(binding(&interner, &subst, "U"), Some(TypeId::STRING));
}

#[test]
fn test_object_properties_and_union_members() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let wrapper = interner.object_from_pairs(&[("value", t)]);
    let maybe = interner.union2(t, TypeId::NULL);
    let func = interner.simple_function(&[("w", wrapper), ("m", maybe)], t);

    let actual = interner.object_from_pairs(&[("value", TypeId::BOOLEAN), ("extra", TypeId::NUMBER)]);
    let subst = infer_type_arguments(&interner, func, &[actual, TypeId::BOOLEAN], &[t]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::BOOLEAN));
}

#[test]
fn test_unbound_parameters_default() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let u = interner.type_variable("U", Some(TypeId::STRING));
    let func = interner.simple_function(&[], t);
    let subst = infer_type_arguments(&interner, func, &[], &[t, u]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::ANY));
    assert_eq!(binding(&interner, &subst, "U"), Some(TypeId::STRING));
}

#[test]
fn test_constraint_violation_falls_back_to_constraint() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", Some(TypeId::STRING));
    let func = interner.simple_function(&[("x", t)], t);
    let subst = infer_type_arguments(&interner, func, &[TypeId::NUMBER], &[t]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::STRING));
}

#[test]
fn test_rest_parameter_matches_trailing_arguments() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let shape = FunctionShape::new(
        vec![ParamInfo::rest(interner.intern_string("xs"), interner.array(t))],
        interner.array(t),
    );
    let func = interner.function(shape);
    let subst = infer_type_arguments(
        &interner,
        func,
        &[TypeId::NUMBER, TypeId::NUMBER, TypeId::STRING],
        &[t],
    );
    let bound = binding(&interner, &subst, "T").expect("bound");
    assert_eq!(interner.display(bound), "number | string");
}

#[test]
fn test_unify_candidates() {
    let interner = TypeInterner::new();
    assert_eq!(
        unify_candidates(&interner, TypeId::NUMBER, TypeId::NUMBER),
        TypeId::NUMBER
    );
    let wide = interner.union2(TypeId::NUMBER, TypeId::STRING);
    assert_eq!(unify_candidates(&interner, TypeId::NUMBER, wide), wide);
    assert_eq!(unify_candidates(&interner, wide, TypeId::NUMBER), wide);

    let numbers = interner.array(TypeId::NUMBER);
    let strings = interner.array(TypeId::STRING);
    let unified = unify_candidates(&interner, numbers, strings);
    assert_eq!(interner.display(unified), "(number | string)[]");

    let unified = unify_candidates(&interner, TypeId::NUMBER, TypeId::BOOLEAN);
    assert_eq!(interner.display(unified), "number | boolean");
}

#[test]
fn test_unify_is_symmetric_for_top_types() {
    let interner = TypeInterner::new();
    for top in [TypeId::ANY, TypeId::UNKNOWN] {
        assert_eq!(unify_candidates(&interner, top, TypeId::NUMBER), top);
        assert_eq!(unify_candidates(&interner, TypeId::NUMBER, top), top);
    }
    assert_eq!(
        unify_candidates(&interner, TypeId::UNKNOWN, TypeId::ANY),
        unify_candidates(&interner, TypeId::ANY, TypeId::UNKNOWN)
    );
}

#[test]
fn test_unify_is_symmetric_for_null_and_undefined() {
    let interner = TypeInterner::new();
    assert_eq!(
        unify_candidates(&interner, TypeId::NULL, TypeId::UNDEFINED),
        unify_candidates(&interner, TypeId::UNDEFINED, TypeId::NULL)
    );
}

#[test]
fn test_any_argument_binds_regardless_of_position() {
    let interner = TypeInterner::new();
    let t = interner.type_variable("T", None);
    let pair = interner.simple_function(&[("a", t), ("b", t)], t);
    let forward = infer_type_arguments(&interner, pair, &[TypeId::ANY, TypeId::NUMBER], &[t]);
    let reverse = infer_type_arguments(&interner, pair, &[TypeId::NUMBER, TypeId::ANY], &[t]);
    assert_eq!(binding(&interner, &forward, "T"), Some(TypeId::ANY));
    assert_eq!(binding(&interner, &reverse, "T"), Some(TypeId::ANY));
}

#[test]
fn test_call_bindings_distinguish_same_named_classes() {
    let interner = TypeInterner::new();
    let (func, _) = identity(&interner);
    let first = ClassTypeBuilder::declare(&interner, "Item", None);
    first.add_property("a", TypeId::NUMBER);
    let second = ClassTypeBuilder::declare(&interner, "Item", None);
    second.add_property("b", TypeId::STRING);
    assert_eq!(interner.display(first.instance_type()), interner.display(second.instance_type()));

    assert_eq!(
        instantiate_generic_call(&interner, func, &[first.instance_type()]),
        first.instance_type()
    );
    assert_eq!(
        instantiate_generic_call(&interner, func, &[second.instance_type()]),
        second.instance_type()
    );
}

#[test]
fn test_instantiate_generic_call() {
    let interner = TypeInterner::new();
    let (func, _) = identity(&interner);
    assert_eq!(
        instantiate_generic_call(&interner, func, &[TypeId::STRING]),
        TypeId::STRING
    );
    // Cached bindings give the same answer.
    assert_eq!(
        instantiate_generic_call(&interner, func, &[TypeId::STRING]),
        TypeId::STRING
    );
    assert_eq!(
        instantiate_generic_call(&interner, func, &[TypeId::NUMBER]),
        TypeId::NUMBER
    );
}

#[test]
fn test_instantiate_call_of_non_function() {
    let interner = TypeInterner::new();
    assert_eq!(
        instantiate_generic_call(&interner, TypeId::NUMBER, &[]),
        TypeId::ANY
    );
    let plain = interner.simple_function(&[], TypeId::BOOLEAN);
    assert_eq!(instantiate_generic_call(&interner, plain, &[]), TypeId::BOOLEAN);
}

#[test]
fn test_inference_emits_tracing_events() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
    let interner = TypeInterner::new();
    let (func, t) = identity(&interner);
    let subst = infer_type_arguments(&interner, func, &[TypeId::BOOLEAN], &[t]);
    assert_eq!(binding(&interner, &subst, "T"), Some(TypeId::BOOLEAN));
}
