//! Integration tests for sequence, mapping and union composition.

use pretty_assertions::assert_eq;
use rstest::rstest;
use schemata::prelude::*;
use serde_json::{Value, json};

fn collect() -> ValidateOptions {
    ValidateOptions::collect_all()
}

fn child_paths(error: &ValidationError) -> Vec<&str> {
    error.errors.iter().map(|e| e.path.as_str()).collect()
}

// ============================================================================
// SEQUENCE
// ============================================================================

#[test]
fn sequence_collects_every_failing_element() {
    let schema = array().of(number().integer());
    let err = schema
        .validate_with(json!([1, 2.5, 3, "x"]), &collect())
        .unwrap_err();

    assert_eq!(err.kind(), &ConstraintKind::Array);
    assert_eq!(err.errors.len(), 2);
    assert_eq!(child_paths(&err), vec!["[1]", "[3]"]);
    assert_eq!(err.errors[0].invalid_value, Some(json!(2.5)));
    assert_eq!(err.errors[1].invalid_value, Some(json!("x")));
}

#[test]
fn sequence_fails_fast_on_first_element() {
    let err = array()
        .of(number().integer())
        .validate(json!([1, 2.5, 3, "x"]))
        .unwrap_err();

    assert_eq!(err.kind(), &ConstraintKind::Integer);
    assert_eq!(err.path, "[1]");
    assert_eq!(err.total_error_count(), 1);
}

// ============================================================================
// MAPPING
// ============================================================================

#[test]
fn mapping_aggregates_field_failures() {
    let schema = mapping()
        .field("a", number().required())
        .field("b", string());

    let err = schema
        .validate_with(json!({"b": "ok"}), &collect())
        .unwrap_err();

    assert_eq!(err.kind(), &ConstraintKind::Object);
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].kind(), &ConstraintKind::Required);
    assert_eq!(err.errors[0].path, "a");
}

#[test]
fn mapping_returns_transformed_fields() {
    let schema = mapping()
        .field("a", number().required())
        .field("b", string().transform(|v| json!(v.as_str().unwrap_or_default().to_uppercase())));

    let out = schema.validate(json!({"a": 1, "b": "ok"})).unwrap();
    assert_eq!(out, json!({"a": 1, "b": "OK"}));
}

#[test]
fn required_message_override_is_reported() {
    let schema = mapping().field("a", number().required().with_message("a is mandatory"));
    let err = schema.validate(json!({})).unwrap_err();
    assert_eq!(err.message(), "a is mandatory");
}

// ============================================================================
// UNION
// ============================================================================

fn returns(value: i64) -> SchemaRef {
    mixed().transform(move |_| json!(value)).into()
}

fn rejects() -> SchemaRef {
    mixed()
        .test(|_| Err(ValidationError::custom("rejected", "always rejects")))
        .into()
}

#[rstest]
#[case::success_then_failure(vec![returns(1), rejects()], json!(1))]
#[case::two_successes(vec![returns(1), returns(2)], json!(2))]
#[case::failure_then_success(vec![rejects(), returns(3)], json!(3))]
fn union_returns_last_success(#[case] options: Vec<SchemaRef>, #[case] expected: Value) {
    let schema = union().one_of(options);
    assert_eq!(schema.validate(json!("anything")).unwrap(), expected);
}

#[test]
fn union_without_success_wraps_every_option() {
    let err = union()
        .one_of([rejects(), rejects()])
        .validate(json!(0))
        .unwrap_err();
    assert_eq!(err.kind(), &ConstraintKind::OneOf);
    assert_eq!(child_paths(&err), vec!["[0]", "[1]"]);
}

// ============================================================================
// PATHS
// ============================================================================

#[test]
fn nested_element_path_in_collect_all_mode() {
    let schema = mapping().field("items", array().of(number()));
    let err = schema
        .validate_with(json!({"items": [0, 1, "two"]}), &collect())
        .unwrap_err();

    let leaf = err.find("items[2]").expect("element error is reported");
    assert_eq!(leaf.kind(), &ConstraintKind::Type);
    assert_eq!(
        err.flatten().iter().map(|e| e.path.as_str()).collect::<Vec<_>>(),
        vec!["", "items", "items[2]"]
    );
}

#[test]
fn fail_fast_reports_at_the_outermost_child() {
    let schema = mapping().field("items", array().of(number()));
    let err = schema.validate(json!({"items": [0, 1, "two"]})).unwrap_err();

    assert_eq!(err.kind(), &ConstraintKind::Type);
    assert_eq!(err.path, "items");
    assert!(!err.has_nested());
}

#[test]
fn deep_paths_join_keys_and_indices() {
    let schema = mapping().field(
        "users",
        array().of(mapping().field("email", string().email())),
    );
    let err = schema
        .validate_with(
            json!({"users": [{"email": "a@b.io"}, {"email": "bad"}]}),
            &collect(),
        )
        .unwrap_err();
    assert!(err.find("users[1].email").is_some());
}

// ============================================================================
// SHARING
// ============================================================================

#[test]
fn one_child_under_several_parents() {
    let positive: SchemaRef = number().positive().into();
    let pair = mapping()
        .field("x", positive.clone())
        .field("y", positive.clone());
    let list = array().of(positive.clone());

    assert!(pair.get("x").unwrap().ptr_eq(&positive));
    assert!(list.item_schema().ptr_eq(&positive));

    assert!(pair.validate(json!({"x": 1, "y": 2})).is_ok());
    assert_eq!(pair.validate(json!({"x": 1, "y": 0})).unwrap_err().path, "y");
    assert!(list.validate(json!([-1])).is_err());
}

#[test]
fn builders_do_not_alias() {
    let base = string().min(2);
    let strict = base.clone().max(3);

    assert!(base.validate(json!("abcdef")).is_ok());
    assert!(strict.validate(json!("abcdef")).is_err());
}

// ============================================================================
// ERROR REPORTING
// ============================================================================

#[test]
fn error_tree_serializes_to_json() {
    let err = mapping()
        .field("age", number().ge(0))
        .validate_with(json!({"age": -1}), &collect())
        .unwrap_err();

    assert_eq!(
        err.to_json_value(),
        json!({
            "kind": "object",
            "message": "Invalid object",
            "path": "",
            "data": null,
            "invalid_value": {"age": -1},
            "errors": [{
                "kind": "ge",
                "message": "Value must be greater than or equal to 0",
                "path": "age",
                "data": 0,
                "invalid_value": -1,
                "errors": [],
            }],
        })
    );
}

#[test]
fn display_lists_children() {
    let err = array()
        .of(number())
        .validate_with(json!(["a"]), &collect())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "array: Invalid array\n  1. [[0]] type: Value should be of type number, got string"
    );
}
