use super::*;
use crate::test_fixtures::*;
use scry_solver::TypeInterner;

#[test]
fn test_promise_of_names_the_payload() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let promise = checker.promise_of(TypeId::NUMBER);
    assert_eq!(checker.display(promise), "Promise<number>");
    assert!(checker.is_promise_instance(promise));
}

#[test]
fn test_promise_types_are_cached_per_payload() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let first = checker.promise_of(TypeId::STRING);
    let second = checker.promise_of(TypeId::STRING);
    let other = checker.promise_of(TypeId::BOOLEAN);
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn test_promises_do_not_nest() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let inner = checker.promise_of(TypeId::NUMBER);
    assert_eq!(checker.promise_of(inner), inner);
}

#[test]
fn test_await_unwraps_typed_promise() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let promise = checker.promise_of(TypeId::NUMBER);
    assert_eq!(checker.awaited_type(promise), TypeId::NUMBER);
}

#[test]
fn test_await_on_untyped_promise_is_any() {
    let interner = TypeInterner::new();
    let checker = TypeChecker::new(&interner);
    let promise = checker.promise_class().expect("host Promise");
    let instance = interner.instance_type(promise);
    assert_eq!(checker.awaited_type(instance), TypeId::ANY);
}

#[test]
fn test_await_on_plain_value_is_the_value() {
    let interner = TypeInterner::new();
    let checker = TypeChecker::new(&interner);
    assert_eq!(checker.awaited_type(TypeId::STRING), TypeId::STRING);
}

#[test]
fn test_await_maps_over_unions() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let promise = checker.promise_of(TypeId::NUMBER);
    let either = interner.union2(promise, TypeId::STRING);
    let awaited = checker.awaited_type(either);
    assert_eq!(interner.union_members(awaited), vec![TypeId::NUMBER, TypeId::STRING]);
}

#[test]
fn test_async_function_returns_promise_of_body_type() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![
        async_func_decl("load", &[], vec![ret(num(42.0))]),
        async_func_decl(
            "main",
            &[],
            vec![
                const_("value", await_(call(ident("load"), vec![]))),
                ret(binary("+", ident("value"), num(1.0))),
            ],
        ),
        const_("pending", call(ident("main"), vec![])),
    ])));

    let load = checker.symbol_type("load").expect("load");
    assert_eq!(checker.display(load), "() => Promise<number>");
    let pending = checker.symbol_type("pending").expect("pending");
    assert_eq!(checker.display(pending), "Promise<number>");
    assert!(checker.diagnostics().is_empty());
}

#[test]
fn test_async_function_without_return_is_promise_of_void() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![async_func_decl("tick", &[], vec![])])));
    let tick = checker.symbol_type("tick").expect("tick");
    assert_eq!(checker.display(tick), "() => Promise<void>");
}

#[test]
fn test_then_callback_receives_payload() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![
        async_func_decl("name", &[], vec![ret(string("scry"))]),
        const_(
            "chained",
            call(
                member(call(ident("name"), vec![]), "then"),
                vec![arrow(&["text"], member(ident("text"), "length"))],
            ),
        ),
    ])));
    // `then` itself returns the untyped host promise.
    let chained = checker.symbol_type("chained").expect("chained");
    assert_eq!(checker.display(chained), "Promise");
    assert!(checker.diagnostics().is_empty());
}

#[test]
fn test_promise_resolve_wraps_argument() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![const_(
        "ready",
        call(member(ident("Promise"), "resolve"), vec![boolean(true)]),
    )])));
    let ready = checker.symbol_type("ready").expect("ready");
    assert_eq!(checker.display(ready), "Promise<boolean>");
}
