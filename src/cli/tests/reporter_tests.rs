use super::driver::{Report, SymbolReport};
use super::reporter::Reporter;
use scry_checker::{ClassInfo, ClassMemberInfo};
use scry_common::{Diagnostic, DiagnosticCategory};
use scry_solver::TypeInterner;

fn sample_report() -> Report {
    let interner = TypeInterner::new();
    let class = interner.declare_class("Dog", None);
    Report {
        success: true,
        symbols: vec![
            SymbolReport {
                name: "rex".into(),
                type_text: Some("Dog".into()),
            },
            SymbolReport {
                name: "ghost".into(),
                type_text: None,
            },
        ],
        classes: vec![ClassInfo {
            name: "Dog".into(),
            id: class,
            super_class: Some("Animal".into()),
            members: vec![
                ClassMemberInfo {
                    name: "bark".into(),
                    type_text: "() => string".into(),
                    is_static: false,
                },
                ClassMemberInfo {
                    name: "create".into(),
                    type_text: "() => Dog".into(),
                    is_static: true,
                },
            ],
        }],
        diagnostics: vec![Diagnostic::new(
            10,
            4,
            "Cannot find name 'oops'.".into(),
            DiagnosticCategory::Warning,
            2304,
        )],
        completions: None,
    }
}

#[test]
fn renders_plain_text_sections() {
    let output = Reporter::new(false).render(&sample_report());
    let expected = "\
Symbols
  rex: Dog
  ghost: <not declared>

Classes
  Dog extends Animal
    bark: () => string
    static create: () => Dog

Diagnostics
  10..14 - warning SC2304: Cannot find name 'oops'.";
    assert_eq!(output, expected);
}

#[test]
fn marks_failed_analysis() {
    let mut report = sample_report();
    report.success = false;
    report.symbols.clear();
    report.classes.clear();
    report.diagnostics.clear();
    assert_eq!(Reporter::new(false).render(&report), "analysis failed");
}

#[test]
fn empty_completion_list_still_has_heading() {
    let mut report = sample_report();
    report.symbols.clear();
    report.classes.clear();
    report.diagnostics.clear();
    report.completions = Some(Vec::new());
    assert_eq!(Reporter::new(false).render(&report), "Completions");
}
