use clap::Parser;

use super::args::CliArgs;
use super::driver::{build_hierarchy, run, value_from_json};
use crate::solver::{RelationError, RelationKind, TypeId, Value};

fn run_args(argv: &[&str]) -> anyhow::Result<super::driver::RelationOutcome> {
    let mut full = vec!["gentype"];
    full.extend_from_slice(argv);
    let args = CliArgs::try_parse_from(full).expect("args should parse");
    run(&args)
}

#[test]
fn check_reports_canonical_spelling() {
    let outcome = run_args(&["check", "[1,2]", "typing.List[int]"]).expect("check should run");

    assert_eq!(outcome.relation, RelationKind::Instance);
    assert_eq!(outcome.subject, "[1, 2]");
    assert_eq!(outcome.target, "list[int]");
    assert!(outcome.holds);
}

#[test]
fn check_failure_is_not_an_error() {
    let outcome = run_args(&["check", "[1, 'a']", "list[int]"]).expect("check should run");
    assert!(!outcome.holds);
}

#[test]
fn check_json_value() {
    let outcome = run_args(&[
        "check",
        "--json-value",
        r#"{"a": [1, null], "b": []}"#,
        "dict[str, list[Optional[int]]]",
    ])
    .expect("check should run");

    assert!(outcome.holds);
    assert_eq!(outcome.subject, "{'a': [1, None], 'b': []}");
}

#[test]
fn subtype_queries() {
    assert!(run_args(&["subtype", "list[bool]", "Sequence[int]"]).unwrap().holds);
    assert!(!run_args(&["subtype", "tuple[int, ...]", "tuple[int]"]).unwrap().holds);
    assert!(run_args(&["subtype", "Literal['a', 'b']", "str | None"]).unwrap().holds);
}

#[test]
fn declared_classes_are_visible() {
    let outcome = run_args(&[
        "--class",
        "Animal",
        "--class",
        "Dog:Animal",
        "check",
        "[Dog()]",
        "list[Animal]",
    ])
    .expect("check should run");
    assert!(outcome.holds);
}

#[test]
fn build_hierarchy_rejects_bad_declarations() {
    let unknown = build_hierarchy(&["Dog:Cat".parse().unwrap()]).unwrap_err();
    assert!(unknown.to_string().contains("unknown base class `Cat`"));

    let duplicate = build_hierarchy(&["int".parse().unwrap()]).unwrap_err();
    assert!(duplicate.to_string().contains("failed to declare class `int`"));

    let hierarchy = build_hierarchy(&["MyList:list".parse().unwrap()]).unwrap();
    let my_list = hierarchy.lookup("MyList").unwrap();
    assert!(hierarchy.contains(my_list));
    assert!(crate::solver::TypeHost::is_subclass(&hierarchy, my_list, TypeId::LIST));
}

#[test]
fn parse_errors_carry_context() {
    let err = run_args(&["check", "[1", "list[int]"]).unwrap_err();
    assert!(format!("{err:#}").starts_with("failed to parse value `[1`"));

    let err = run_args(&["subtype", "int", "Frob"]).unwrap_err();
    assert!(format!("{err:#}").contains("unknown name `Frob`"));
}

#[test]
fn relation_errors_pass_through() {
    let err = run_args(&["subtype", "tuple[..., int]", "tuple[int]"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RelationError>(),
        Some(RelationError::MalformedDescriptor { .. })
    ));
}

#[test]
fn json_conversion() {
    assert_eq!(value_from_json(&serde_json::json!(null)), Value::None);
    assert_eq!(value_from_json(&serde_json::json!(-3)), Value::Int(-3));
    assert_eq!(value_from_json(&serde_json::json!(2.5)), Value::Float(2.5));
    assert_eq!(
        value_from_json(&serde_json::json!(u64::MAX)),
        Value::Float(u64::MAX as f64)
    );
    assert_eq!(
        value_from_json(&serde_json::json!({"z": true, "a": "x"})),
        Value::Dict(vec![
            (Value::str("z"), Value::Bool(true)),
            (Value::str("a"), Value::str("x")),
        ])
    );
}
