use super::*;
use crate::test_fixtures::*;
use scry_solver::TypeInterner;

fn analyze_numbers(checker: &mut TypeChecker<'_>, statements: Vec<serde_json::Value>) {
    let mut body = vec![const_("nums", array(vec![num(1.0), num(2.0), num(3.0)]))];
    body.extend(statements);
    let result = checker.analyze(&parse(program(body)));
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

fn type_text(checker: &TypeChecker<'_>, name: &str) -> String {
    checker.display(checker.symbol_type(name).expect("bound"))
}

#[test]
fn test_map_uses_callback_result() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![
            const_(
                "doubled",
                call(member(ident("nums"), "map"), vec![arrow(&["n"], binary("*", ident("n"), num(2.0)))]),
            ),
            const_(
                "labels",
                call(
                    member(ident("nums"), "map"),
                    vec![arrow(&["n"], call(member(ident("n"), "toFixed"), vec![num(1.0)]))],
                ),
            ),
        ],
    );
    assert_eq!(type_text(&checker, "doubled"), "number[]");
    assert_eq!(type_text(&checker, "labels"), "string[]");
}

#[test]
fn test_filter_keeps_element_type() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![const_(
            "evens",
            call(
                member(ident("nums"), "filter"),
                vec![arrow(
                    &["n"],
                    binary("===", binary("%", ident("n"), num(2.0)), num(0.0)),
                )],
            ),
        )],
    );
    assert_eq!(type_text(&checker, "evens"), "number[]");
}

#[test]
fn test_find_may_be_undefined() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![const_(
            "found",
            call(member(ident("nums"), "find"), vec![arrow(&["n"], binary(">", ident("n"), num(1.0)))]),
        )],
    );
    assert_eq!(type_text(&checker, "found"), "number | undefined");
}

#[test]
fn test_reduce_with_initializer_uses_initializer_type() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![
            const_(
                "sum",
                call(
                    member(ident("nums"), "reduce"),
                    vec![arrow(&["acc", "n"], binary("+", ident("acc"), ident("n"))), num(0.0)],
                ),
            ),
            const_(
                "text",
                call(
                    member(ident("nums"), "reduce"),
                    vec![arrow(&["acc", "n"], binary("+", ident("acc"), ident("n"))), string("")],
                ),
            ),
        ],
    );
    assert_eq!(type_text(&checker, "sum"), "number");
    assert_eq!(type_text(&checker, "text"), "string");
}

#[test]
fn test_reduce_without_initializer_uses_callback_result() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![const_(
            "total",
            call(
                member(ident("nums"), "reduce"),
                vec![arrow(&["acc", "n"], binary("+", ident("acc"), ident("n")))],
            ),
        )],
    );
    assert_eq!(type_text(&checker, "total"), "number");
}

#[test]
fn test_chained_array_methods() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let mapped = call(
        member(ident("nums"), "map"),
        vec![arrow(&["n"], call(member(ident("n"), "toString"), vec![]))],
    );
    analyze_numbers(
        &mut checker,
        vec![
            const_("joined", call(member(mapped, "join"), vec![string(",")])),
            const_("size", member(ident("nums"), "length")),
            const_("sorted", call(member(ident("nums"), "sort"), vec![])),
        ],
    );
    assert_eq!(type_text(&checker, "joined"), "string");
    assert_eq!(type_text(&checker, "size"), "number");
    assert_eq!(type_text(&checker, "sorted"), "number[]");
}

#[test]
fn test_callback_declared_elsewhere() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    analyze_numbers(
        &mut checker,
        vec![
            func_decl("describe", &["n"], vec![ret(string("item"))]),
            const_("described", call(member(ident("nums"), "map"), vec![ident("describe")])),
        ],
    );
    assert_eq!(type_text(&checker, "described"), "string[]");
}

#[test]
fn test_plain_function_call_returns_declared_result() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![
        func_decl(
            "pick",
            &["flag"],
            vec![
                if_else(ident("flag"), vec![ret(num(1.0))], None),
                ret(string("none")),
            ],
        ),
        const_("picked", call(ident("pick"), vec![boolean(true)])),
        const_("nothing", call(ident("notAFunction"), vec![])),
    ])));
    let picked = checker.symbol_type("picked").expect("picked");
    assert_eq!(interner.union_members(picked), vec![TypeId::NUMBER, TypeId::STRING]);
    assert_eq!(checker.symbol_type("nothing"), Some(TypeId::ANY));
}

#[test]
fn test_host_object_method_call() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let result = checker.analyze(&parse(program(vec![const_(
        "parsed",
        call(member(ident("JSON"), "parse"), vec![string("{}")]),
    )])));
    assert!(result.diagnostics.is_empty());
    assert_eq!(checker.symbol_type("parsed"), Some(TypeId::ANY));
}

#[test]
fn test_method_call_on_primitive() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    checker.analyze(&parse(program(vec![
        const_("name", string("scry")),
        const_("shout", call(member(ident("name"), "toUpperCase"), vec![])),
    ])));
    assert_eq!(checker.symbol_type("shout"), Some(TypeId::STRING));
}
