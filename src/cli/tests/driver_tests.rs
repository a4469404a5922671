use serde_json::{Value, json};

use super::driver::{Report, Request, analyze_file, analyze_source};
use scry_checker::CheckerOptions;

fn ident(name: &str) -> Value {
    json!({ "type": "Identifier", "name": name })
}

fn number(value: f64) -> Value {
    json!({ "type": "Literal", "value": value, "raw": value.to_string() })
}

fn const_decl(name: &str, init: Value) -> Value {
    json!({
        "type": "VariableDeclaration",
        "kind": "const",
        "declarations": [{ "type": "VariableDeclarator", "id": ident(name), "init": init }]
    })
}

fn class_decl(name: &str, super_class: Option<&str>, methods: Vec<(&str, Value)>) -> Value {
    let body: Vec<Value> = methods
        .into_iter()
        .map(|(key, returned)| {
            json!({
                "type": "MethodDefinition",
                "kind": "method",
                "static": false,
                "computed": false,
                "key": ident(key),
                "value": {
                    "type": "FunctionExpression",
                    "params": [],
                    "body": {
                        "type": "BlockStatement",
                        "body": [{ "type": "ReturnStatement", "argument": returned }]
                    }
                }
            })
        })
        .collect();
    json!({
        "type": "ClassDeclaration",
        "id": ident(name),
        "superClass": super_class.map(ident),
        "body": { "type": "ClassBody", "body": body }
    })
}

/// ```js
/// class Animal { speak() { return "..."; } }
/// class Dog extends Animal { bark() { return 1; } }
/// const rex = new Dog();
/// const total = [1, 2, 3].reduce((acc, x) => acc + x, 0);
/// missing;
/// ```
fn sample_program() -> String {
    let reduce = json!({
        "type": "CallExpression",
        "callee": {
            "type": "MemberExpression",
            "object": { "type": "ArrayExpression", "elements": [number(1.0), number(2.0), number(3.0)] },
            "property": ident("reduce"),
            "computed": false
        },
        "arguments": [
            {
                "type": "ArrowFunctionExpression",
                "expression": true,
                "params": [ident("acc"), ident("x")],
                "body": { "type": "BinaryExpression", "operator": "+", "left": ident("acc"), "right": ident("x") }
            },
            number(0.0)
        ]
    });
    let program = json!({
        "type": "Program",
        "start": 0,
        "end": 500,
        "body": [
            class_decl("Animal", None, vec![("speak", json!({ "type": "Literal", "value": "...", "raw": "'...'" }))]),
            class_decl("Dog", Some("Animal"), vec![("bark", number(1.0))]),
            const_decl("rex", json!({ "type": "NewExpression", "callee": ident("Dog"), "arguments": [] })),
            const_decl("total", reduce),
            { "type": "ExpressionStatement", "expression": { "type": "Identifier", "name": "missing", "start": 300, "end": 307 } }
        ]
    });
    program.to_string()
}

fn symbol_type<'r>(report: &'r Report, name: &str) -> Option<&'r str> {
    report
        .symbols
        .iter()
        .find(|symbol| symbol.name == name)
        .and_then(|symbol| symbol.type_text.as_deref())
}

#[test]
fn reports_top_level_symbols_and_classes() {
    let report = analyze_source(&sample_program(), &CheckerOptions::default(), &Request::default())
        .expect("analysis should run");

    assert!(report.success);
    assert_eq!(symbol_type(&report, "rex"), Some("Dog"));
    assert_eq!(symbol_type(&report, "total"), Some("number"));
    assert_eq!(symbol_type(&report, "Dog"), Some("typeof Dog"));

    let names: Vec<&str> = report.classes.iter().map(|class| class.name.as_str()).collect();
    assert_eq!(names, vec!["Animal", "Dog"]);
    assert_eq!(report.classes[1].super_class.as_deref(), Some("Animal"));
    assert!(report.completions.is_none());
}

#[test]
fn reports_unresolved_names_unless_disabled() {
    let report = analyze_source(&sample_program(), &CheckerOptions::default(), &Request::default())
        .expect("analysis should run");
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, 2304);
    assert_eq!(report.diagnostics[0].start, 300);
    assert_eq!(report.diagnostics[0].length, 7);

    let quiet = CheckerOptions {
        report_unresolved: false,
        ..CheckerOptions::default()
    };
    let report = analyze_source(&sample_program(), &quiet, &Request::default())
        .expect("analysis should run");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn requested_symbols_keep_order_and_mark_missing() {
    let request = Request {
        symbols: vec!["total".into(), "nope".into(), "rex".into()],
        ..Request::default()
    };
    let report = analyze_source(&sample_program(), &CheckerOptions::default(), &request)
        .expect("analysis should run");

    let names: Vec<&str> = report.symbols.iter().map(|symbol| symbol.name.as_str()).collect();
    assert_eq!(names, vec!["total", "nope", "rex"]);
    assert_eq!(report.symbols[1].type_text, None);
}

#[test]
fn lists_completions_at_offset() {
    let request = Request {
        completions_at: Some(0),
        prefix: "tot".into(),
        ..Request::default()
    };
    let report = analyze_source(&sample_program(), &CheckerOptions::default(), &request)
        .expect("analysis should run");

    let completions = report.completions.expect("completions requested");
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].label, "total");
    assert_eq!(completions[0].detail, "number");
}

#[test]
fn serialises_report_as_camel_case_json() {
    let request = Request {
        symbols: vec!["nope".into()],
        ..Request::default()
    };
    let report = analyze_source(&sample_program(), &CheckerOptions::default(), &request)
        .expect("analysis should run");
    let value = serde_json::to_value(&report).expect("serialize");

    assert_eq!(value["success"], json!(true));
    assert_eq!(value["symbols"][0], json!({ "name": "nope", "type": null }));
    assert_eq!(value["classes"][1]["superClass"], json!("Animal"));
    assert_eq!(value["diagnostics"][0]["messageText"], json!("Cannot find name 'missing'."));
    assert!(value.get("completions").is_none());
}

#[test]
fn non_program_root_is_unsuccessful() {
    let report = analyze_source(
        &ident("x").to_string(),
        &CheckerOptions::default(),
        &Request::default(),
    )
    .expect("analysis should run");
    assert!(!report.success);
    assert_eq!(report.diagnostics[0].code, 1000);
}

#[test]
fn invalid_json_is_an_error() {
    let err = analyze_source("{ \"type\": ", &CheckerOptions::default(), &Request::default())
        .expect_err("should fail");
    assert!(err.to_string().contains("not a valid ESTree JSON document"));
}

#[test]
fn analyze_file_reads_from_disk() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = temp.path().join("program.json");
    std::fs::write(&path, sample_program()).expect("write input");

    let report = analyze_file(&path, &CheckerOptions::default(), &Request::default())
        .expect("analysis should run");
    assert_eq!(symbol_type(&report, "rex"), Some("Dog"));

    let err = analyze_file(&temp.path().join("absent.json"), &CheckerOptions::default(), &Request::default())
        .expect_err("missing file");
    assert!(err.to_string().contains("failed to read input"));
}
