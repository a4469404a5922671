use super::*;

#[test]
fn test_intrinsics_are_preinterned() {
    let interner = TypeInterner::new();
    assert_eq!(interner.len() as u32, TypeId::FIRST_USER);
    assert_eq!(interner.lookup(TypeId::ANY), Some(TypeData::Any));
    assert_eq!(
        interner.lookup(TypeId::STRING),
        Some(TypeData::Primitive(PrimitiveKind::String))
    );
    assert_eq!(interner.kind(TypeId::NULL), TypeKind::Primitive);
}

#[test]
fn test_structural_types_are_hash_consed() {
    let interner = TypeInterner::new();
    let a = interner.array(TypeId::NUMBER);
    let b = interner.array(TypeId::NUMBER);
    assert_eq!(a, b);

    let o1 = interner.object_from_pairs(&[("x", TypeId::NUMBER)]);
    let o2 = interner.object_from_pairs(&[("x", TypeId::NUMBER)]);
    assert_eq!(o1, o2);
    assert_ne!(o1, interner.object_from_pairs(&[("x", TypeId::STRING)]));
}

#[test]
fn test_union_flattens_and_dedupes() {
    let interner = TypeInterner::new();
    let inner = interner.union(vec![TypeId::STRING, TypeId::NUMBER]);
    let outer = interner.union(vec![inner, TypeId::BOOLEAN, TypeId::STRING]);
    assert_eq!(
        interner.union_members(outer),
        vec![TypeId::STRING, TypeId::NUMBER, TypeId::BOOLEAN]
    );
}

#[test]
fn test_union_simplifications() {
    let interner = TypeInterner::new();
    assert_eq!(interner.union(Vec::new()), TypeId::NEVER);
    assert_eq!(
        interner.union(vec![TypeId::NUMBER, TypeId::NUMBER]),
        TypeId::NUMBER
    );
    assert_eq!(interner.union2(TypeId::NEVER, TypeId::STRING), TypeId::STRING);
    assert_eq!(interner.union2(TypeId::ANY, TypeId::STRING), TypeId::ANY);
    assert_eq!(
        interner.union2(TypeId::STRING, TypeId::UNKNOWN),
        TypeId::UNKNOWN
    );
}

#[test]
fn test_union_never_contains_never_or_nested_union() {
    let interner = TypeInterner::new();
    let a = interner.union(vec![TypeId::NULL, TypeId::NEVER, TypeId::UNDEFINED]);
    let b = interner.union(vec![a, TypeId::NUMBER]);
    let Some(TypeData::Union(members)) = interner.lookup(b) else {
        panic!("expected union");
    };
    assert!(!members.contains(&TypeId::NEVER));
    assert!(
        members
            .iter()
            .all(|&m| interner.kind(m) != TypeKind::Union)
    );
}

#[test]
fn test_type_variables_are_distinct_per_call() {
    let interner = TypeInterner::new();
    let t1 = interner.type_variable("T", None);
    let t2 = interner.type_variable("T", None);
    assert_ne!(t1, t2);
    let info1 = interner.type_var_info(t1).expect("type variable");
    let info2 = interner.type_var_info(t2).expect("type variable");
    assert_eq!(info1.name, info2.name);
    assert_ne!(info1.id, info2.id);
}

#[test]
fn test_separate_interners_have_separate_counters() {
    let first = TypeInterner::new();
    let second = TypeInterner::new();
    let a = first.type_variable("T", None);
    let b = second.type_variable("T", None);
    assert_eq!(
        first.type_var_info(a).map(|i| i.id),
        second.type_var_info(b).map(|i| i.id)
    );
}

#[test]
fn test_class_store_members() {
    let interner = TypeInterner::new();
    let animal = interner.declare_class("Animal", None);
    let speak = interner.intern_string("speak");
    let method = interner.simple_function(&[], TypeId::VOID);
    interner.add_instance_member(animal, speak, method);

    assert_eq!(interner.own_instance_member(animal, speak), Some(method));
    assert_eq!(interner.own_static_member(animal, speak), None);
    assert_eq!(interner.class_name(animal).as_deref(), Some("Animal"));
    assert_ne!(interner.class_type(animal), interner.instance_type(animal));
    assert_eq!(interner.class_of(interner.instance_type(animal)), Some(animal));
}

#[test]
fn test_primitive_members_are_registered_externally() {
    let interner = TypeInterner::new();
    let length = interner.intern_string("length");
    assert_eq!(interner.primitive_member(PrimitiveKind::String, length), None);

    interner.set_primitive_member(PrimitiveKind::String, "length", TypeId::NUMBER);
    assert_eq!(
        interner.primitive_member(PrimitiveKind::String, length),
        Some(TypeId::NUMBER)
    );
    assert_eq!(interner.primitive_members(PrimitiveKind::Number), Vec::new());
}

#[test]
fn test_generic_without_params_is_base() {
    let interner = TypeInterner::new();
    let base = interner.simple_function(&[], TypeId::NUMBER);
    assert_eq!(interner.generic(base, Vec::new()), base);
}
