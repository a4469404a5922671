use super::*;
use crate::test_fixtures::*;
use serde_json::json;

/// Types literals by kind and counts scope callbacks.
#[derive(Default)]
struct LiteralTyper {
    visited: usize,
    open_blocks: i32,
    max_open_blocks: i32,
    catches: usize,
}

impl ExpressionTyper for LiteralTyper {
    fn type_of(&mut self, expr: &Node) -> TypeId {
        match expr {
            Node::Literal(lit) => match lit.kind() {
                scry_ast::LiteralKind::Number => TypeId::NUMBER,
                scry_ast::LiteralKind::String => TypeId::STRING,
                scry_ast::LiteralKind::Boolean => TypeId::BOOLEAN,
                scry_ast::LiteralKind::Null => TypeId::NULL,
                _ => TypeId::ANY,
            },
            _ => TypeId::ANY,
        }
    }

    fn visit_statement(&mut self, _stmt: &Node) {
        self.visited += 1;
    }

    fn enter_block(&mut self, _owner: &Node) {
        self.open_blocks += 1;
        self.max_open_blocks = self.max_open_blocks.max(self.open_blocks);
    }

    fn enter_catch(&mut self, _clause: &CatchClause) {
        self.catches += 1;
        self.open_blocks += 1;
    }

    fn exit_block(&mut self) {
        self.open_blocks -= 1;
    }
}

fn body_type(statements: Vec<serde_json::Value>) -> (TypeInterner, TypeId) {
    let interner = TypeInterner::new();
    let body = parse(block(statements));
    let mut typer = LiteralTyper::default();
    let type_id = analyze_return_type(&interner, &body, false, &mut typer);
    assert_eq!(typer.open_blocks, 0, "every entered scope is left");
    (interner, type_id)
}

#[test]
fn test_no_return_is_void() {
    let (_, type_id) = body_type(vec![expr_stmt(num(1.0))]);
    assert_eq!(type_id, TypeId::VOID);
}

#[test]
fn test_bare_return_is_undefined() {
    let (_, type_id) = body_type(vec![ret_void()]);
    assert_eq!(type_id, TypeId::UNDEFINED);
}

#[test]
fn test_two_return_types_form_a_union() {
    let (interner, type_id) = body_type(vec![if_else(
        boolean(true),
        vec![ret(num(1.0))],
        Some(vec![ret(string("a"))]),
    )]);
    let members = interner.union_members(type_id);
    assert_eq!(members.len(), 2);
    assert!(members.contains(&TypeId::NUMBER));
    assert!(members.contains(&TypeId::STRING));
}

#[test]
fn test_repeated_return_type_is_deduplicated() {
    let (_, type_id) = body_type(vec![
        if_else(boolean(true), vec![ret(num(1.0))], None),
        ret(num(2.0)),
    ]);
    assert_eq!(type_id, TypeId::NUMBER);
}

#[test]
fn test_single_return_wins_over_fall_through() {
    let interner = TypeInterner::new();
    let statements = match parse(block(vec![if_else(boolean(true), vec![ret(num(1.0))], None)])) {
        Node::BlockStatement(block) => block.body,
        _ => unreachable!(),
    };
    let mut typer = LiteralTyper::default();
    let analysis = collect_returns(&interner, &statements, &mut typer);
    assert!(analysis.falls_through);
    assert_eq!(analysis.result_type(&interner), TypeId::NUMBER);
}

#[test]
fn test_statements_after_return_are_not_visited() {
    let interner = TypeInterner::new();
    let statements: Vec<Node> = vec![
        parse(ret(num(1.0))),
        parse(expr_stmt(num(2.0))),
        parse(ret(string("unreachable"))),
    ];
    let mut typer = LiteralTyper::default();
    let analysis = collect_returns(&interner, &statements, &mut typer);
    assert_eq!(typer.visited, 1);
    assert_eq!(analysis.return_types, vec![TypeId::NUMBER]);
    assert!(!analysis.falls_through);
}

#[test]
fn test_if_else_both_returning_does_not_fall_through() {
    let interner = TypeInterner::new();
    let statements = vec![parse(if_else(
        boolean(true),
        vec![ret(num(1.0))],
        Some(vec![throw(string("no"))]),
    ))];
    let mut typer = LiteralTyper::default();
    let analysis = collect_returns(&interner, &statements, &mut typer);
    assert!(!analysis.falls_through);
    assert_eq!(analysis.return_types, vec![TypeId::NUMBER]);
}

#[test]
fn test_nested_function_returns_are_ignored() {
    let (_, type_id) = body_type(vec![
        func_decl("inner", &[], vec![ret(string("x"))]),
        expr_stmt(arrow_block(&[], vec![ret(num(1.0))])),
    ]);
    assert_eq!(type_id, TypeId::VOID);
}

#[test]
fn test_expression_body_is_the_result() {
    let interner = TypeInterner::new();
    let body = parse(string("value"));
    let mut typer = LiteralTyper::default();
    let type_id = analyze_return_type(&interner, &body, true, &mut typer);
    assert_eq!(type_id, TypeId::STRING);
    assert_eq!(typer.visited, 0);
}

#[test]
fn test_try_catch_finally_scopes_are_balanced() {
    let interner = TypeInterner::new();
    let statements = vec![parse(json!({
        "type": "TryStatement",
        "block": { "type": "BlockStatement", "body": [ret(num(1.0))] },
        "handler": {
            "type": "CatchClause",
            "param": ident("error"),
            "body": { "type": "BlockStatement", "body": [ret(null())] }
        },
        "finalizer": { "type": "BlockStatement", "body": [] }
    }))];
    let mut typer = LiteralTyper::default();
    let analysis = collect_returns(&interner, &statements, &mut typer);
    assert_eq!(typer.open_blocks, 0);
    assert_eq!(typer.catches, 1);
    assert_eq!(analysis.return_types, vec![TypeId::NUMBER, TypeId::NULL]);
    assert!(!analysis.falls_through);
}

#[test]
fn test_returns_inside_loops_are_collected() {
    let (interner, type_id) = body_type(vec![
        json!({
            "type": "ForOfStatement",
            "left": declare("const", "item", None),
            "right": array(vec![]),
            "body": block(vec![ret(string("found"))]),
        }),
        ret(num(0.0)),
    ]);
    let members = interner.union_members(type_id);
    assert_eq!(members.len(), 2);
    assert!(members.contains(&TypeId::STRING));
}
