use super::*;
use crate::test_fixtures::*;
use scry_solver::TypeInterner;
use serde_json::json;

fn analyze(interner: &TypeInterner, body: Vec<serde_json::Value>) -> TypeChecker<'_> {
    let mut checker = TypeChecker::new(interner);
    let result = checker.analyze(&parse(program(body)));
    assert!(result.success);
    checker
}

fn type_text(checker: &TypeChecker<'_>, name: &str) -> String {
    checker.display(checker.symbol_type(name).expect("bound"))
}

#[test]
fn test_function_is_callable_before_its_declaration() {
    let interner = TypeInterner::new();
    let checker = analyze(
        &interner,
        vec![
            const_("early", call(ident("later"), vec![])),
            func_decl("later", &[], vec![ret(string("done"))]),
        ],
    );
    // The hoisted placeholder answers calls made before the declaration.
    assert_eq!(checker.symbol_type("early"), Some(TypeId::ANY));
    assert_eq!(type_text(&checker, "later"), "() => string");
    assert!(checker.diagnostics().is_empty());
}

#[test]
fn test_hoisted_function_carries_flags() {
    let interner = TypeInterner::new();
    let checker = analyze(
        &interner,
        vec![async_func_decl("fetchAll", &[], vec![ret(num(1.0))])],
    );
    let symbol = checker.symbol("fetchAll").expect("declared");
    assert!(symbol.flags.contains(SymbolFlags::ASYNC));
    assert!(symbol.flags.contains(SymbolFlags::HOISTED));
}

#[test]
fn test_var_without_initializer_takes_first_assignment() {
    let interner = TypeInterner::new();
    let checker = analyze(
        &interner,
        vec![
            declare("var", "late", None),
            expr_stmt(assign(ident("late"), string("now"))),
        ],
    );
    assert_eq!(type_text(&checker, "late"), "string");
}

#[test]
fn test_const_keeps_its_declared_type() {
    let interner = TypeInterner::new();
    let checker = analyze(
        &interner,
        vec![
            const_("fixed", num(1.0)),
            expr_stmt(assign(ident("fixed"), string("changed"))),
        ],
    );
    assert_eq!(type_text(&checker, "fixed"), "number");
    let symbol = checker.symbol("fixed").expect("declared");
    assert_eq!(symbol.declaration_kind, Some(DeclarationKind::Const));
}

#[test]
fn test_var_in_block_is_function_scoped() {
    let interner = TypeInterner::new();
    let checker = analyze(
        &interner,
        vec![
            if_else(
                boolean(true),
                vec![declare("var", "leaked", Some(num(1.0))), let_("kept", Some(num(2.0)))],
                None,
            ),
            const_("after", ident("leaked")),
        ],
    );
    assert_eq!(type_text(&checker, "after"), "number");
    assert!(checker.symbol_type("kept").is_none());
}

#[test]
fn test_object_destructuring_takes_property_types() {
    let interner = TypeInterner::new();
    let pattern = json!({
        "type": "ObjectPattern",
        "properties": [
            { "type": "Property", "key": ident("x"), "value": ident("x"), "kind": "init", "shorthand": true },
            { "type": "Property", "key": ident("name"), "value": ident("label"), "kind": "init" },
            { "type": "Property", "key": ident("absent"), "value": ident("absent"), "kind": "init" },
        ]
    });
    let checker = analyze(
        &interner,
        vec![
            const_("point", object(vec![("x", num(1.0)), ("name", string("p"))])),
            json!({
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{ "type": "VariableDeclarator", "id": pattern, "init": ident("point") }]
            }),
        ],
    );
    assert_eq!(type_text(&checker, "x"), "number");
    assert_eq!(type_text(&checker, "label"), "string");
    assert_eq!(type_text(&checker, "absent"), "any");
}

#[test]
fn test_array_destructuring_with_rest_and_default() {
    let interner = TypeInterner::new();
    let pattern = json!({
        "type": "ArrayPattern",
        "elements": [
            ident("head"),
            null,
            { "type": "AssignmentPattern", "left": ident("second"), "right": num(0.0) },
            { "type": "RestElement", "argument": ident("tail") },
        ]
    });
    let checker = analyze(
        &interner,
        vec![json!({
            "type": "VariableDeclaration",
            "kind": "let",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": pattern,
                "init": array(vec![string("a"), string("b")]),
            }]
        })],
    );
    assert_eq!(type_text(&checker, "head"), "string");
    assert_eq!(type_text(&checker, "second"), "string");
    assert_eq!(type_text(&checker, "tail"), "string[]");
}

#[test]
fn test_for_of_binds_element_type() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let loop_stmt = json!({
        "type": "ForOfStatement",
        "start": 10,
        "end": 60,
        "left": declare("const", "word", None),
        "right": array(vec![string("a")]),
        "body": at(
            block(vec![const_("upper", call(member(ident("word"), "toUpperCase"), vec![]))]),
            20,
            55
        ),
    });
    checker.analyze(&parse(program(vec![loop_stmt])));

    let items = checker.completions_at_offset(30, "word");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].detail, "string");
    let upper = checker.completions_at_offset(30, "upper");
    assert_eq!(upper[0].detail, "string");
    assert!(checker.diagnostics().is_empty());
}

#[test]
fn test_for_in_binds_string_keys() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let loop_stmt = json!({
        "type": "ForInStatement",
        "start": 0,
        "end": 40,
        "left": declare("let", "key", None),
        "right": object(vec![("a", num(1.0))]),
        "body": block(vec![]),
    });
    checker.analyze(&parse(program(vec![loop_stmt])));
    let items = checker.completions_at_offset(20, "key");
    assert_eq!(items[0].detail, "string");
}

#[test]
fn test_catch_parameter_is_scoped_to_handler() {
    let interner = TypeInterner::new();
    let mut checker = TypeChecker::new(&interner);
    let try_stmt = json!({
        "type": "TryStatement",
        "block": { "type": "BlockStatement", "body": [] },
        "handler": {
            "type": "CatchClause",
            "start": 20,
            "end": 50,
            "param": ident("failure"),
            "body": { "type": "BlockStatement", "body": [expr_stmt(ident("failure"))] }
        }
    });
    checker.analyze(&parse(program(vec![try_stmt])));

    assert!(checker.diagnostics().is_empty());
    assert!(checker.symbol_type("failure").is_none());
    let items = checker.completions_at_offset(30, "fail");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].detail, "any");
}

#[test]
fn test_iterated_element_type() {
    let interner = TypeInterner::new();
    let checker = TypeChecker::new(&interner);
    let numbers = interner.array(TypeId::NUMBER);
    assert_eq!(checker.iterated_element_type(numbers), TypeId::NUMBER);
    assert_eq!(checker.iterated_element_type(TypeId::STRING), TypeId::STRING);
    assert_eq!(checker.iterated_element_type(TypeId::NUMBER), TypeId::ANY);
}
