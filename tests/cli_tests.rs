//! End-to-end runs of the `scry` binary.

use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scry"))
        .args(args)
        .env_remove("SCRY_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run scry")
}

/// `const doubled = [1, 2].map(n => n * 2); typo;`
fn program() -> String {
    let n = json!({ "type": "Identifier", "name": "n" });
    json!({
        "type": "Program",
        "start": 0,
        "end": 60,
        "body": [
            {
                "type": "VariableDeclaration",
                "kind": "const",
                "declarations": [{
                    "type": "VariableDeclarator",
                    "id": { "type": "Identifier", "name": "doubled" },
                    "init": {
                        "type": "CallExpression",
                        "callee": {
                            "type": "MemberExpression",
                            "object": {
                                "type": "ArrayExpression",
                                "elements": [
                                    { "type": "Literal", "value": 1, "raw": "1" },
                                    { "type": "Literal", "value": 2, "raw": "2" }
                                ]
                            },
                            "property": { "type": "Identifier", "name": "map" },
                            "computed": false
                        },
                        "arguments": [{
                            "type": "ArrowFunctionExpression",
                            "expression": true,
                            "params": [n],
                            "body": {
                                "type": "BinaryExpression",
                                "operator": "*",
                                "left": n,
                                "right": { "type": "Literal", "value": 2, "raw": "2" }
                            }
                        }]
                    }
                }]
            },
            {
                "type": "ExpressionStatement",
                "expression": { "type": "Identifier", "name": "typo", "start": 40, "end": 44 }
            }
        ]
    })
    .to_string()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn json_output_lists_types_and_diagnostics() {
    let temp = tempfile::tempdir().expect("temp dir");
    let input = write_file(temp.path(), "program.json", &program());

    let output = run(&[input.to_str().expect("utf-8 path"), "--format", "json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report = stdout_json(&output);
    assert_eq!(report["symbols"], json!([{ "name": "doubled", "type": "number[]" }]));
    assert_eq!(report["diagnostics"][0]["code"], json!(2304));
    assert_eq!(report["diagnostics"][0]["start"], json!(40));
}

#[test]
fn config_beside_input_is_applied() {
    let temp = tempfile::tempdir().expect("temp dir");
    let input = write_file(temp.path(), "program.json", &program());
    write_file(
        temp.path(),
        "scry.json",
        r#"{
          // quiet and machine-readable
          "checker": { "reportUnresolved": "false" },
          "output": { "format": "json" },
        }"#,
    );

    let output = run(&[input.to_str().expect("utf-8 path")]);
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["diagnostics"], json!([]));
}

#[test]
fn text_output_without_color() {
    let temp = tempfile::tempdir().expect("temp dir");
    let input = write_file(temp.path(), "program.json", &program());

    let output = run(&[input.to_str().expect("utf-8 path"), "--no-color", "--symbol", "doubled"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  doubled: number[]"), "{stdout}");
    assert!(stdout.contains("warning SC2304: Cannot find name 'typo'."), "{stdout}");
}

#[test]
fn non_program_root_exits_with_failure() {
    let temp = tempfile::tempdir().expect("temp dir");
    let input = write_file(temp.path(), "expr.json", r#"{ "type": "Identifier", "name": "x" }"#);

    let output = run(&[input.to_str().expect("utf-8 path"), "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["success"], json!(false));
}

#[test]
fn missing_input_reports_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let missing = temp.path().join("absent.json");

    let output = run(&[missing.to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read input"), "{stderr}");
}
