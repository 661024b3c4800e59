//! Targeted validation-failure tests for artifact documents.
//!
//! Each test mutates a valid fixture and checks that reading it fails with
//! the right error kind.

use std::io::Cursor;

use gradecast::persist::{read_model_json, read_scaler_json, ReadError};
use gradecast::testing::test_cases_dir;
use serde_json::Value;

fn load_fixture_value(name: &str) -> Value {
    let path = test_cases_dir().join("artifacts").join(name);
    let bytes = std::fs::read(&path).expect("read fixture");
    serde_json::from_slice(&bytes).expect("parse fixture json")
}

fn model_err(v: Value) -> ReadError {
    let bytes = serde_json::to_vec(&v).expect("serialize mutated json");
    read_model_json(Cursor::new(&bytes)).expect_err("expected error")
}

fn scaler_err(v: Value) -> ReadError {
    let bytes = serde_json::to_vec(&v).expect("serialize mutated json");
    read_scaler_json(Cursor::new(&bytes)).expect_err("expected error")
}

#[test]
fn validation_fails_on_mismatched_tree_arrays() {
    let mut v = load_fixture_value("model_forest.json");

    let thresholds = v
        .pointer_mut("/model/trees/0/thresholds")
        .and_then(|x| x.as_array_mut())
        .expect("thresholds array");
    thresholds.pop();

    let err = model_err(v);
    assert!(matches!(err, ReadError::Validation(_)), "got: {err:?}");
}

#[test]
fn validation_fails_on_out_of_bounds_child_index() {
    let mut v = load_fixture_value("model_forest.json");

    let children_left = v
        .pointer_mut("/model/trees/1/children_left")
        .and_then(|x| x.as_array_mut())
        .expect("children_left array");
    children_left[0] = Value::from(9_999_999u64);

    let err = model_err(v);
    assert!(matches!(err, ReadError::Validation(_)), "got: {err:?}");
}

#[test]
fn validation_fails_on_split_feature_out_of_range() {
    let mut v = load_fixture_value("model_forest.json");

    *v.pointer_mut("/model/trees/2/split_indices/0")
        .expect("split index") = Value::from(12u32);

    let err = model_err(v);
    match err {
        ReadError::Validation(msg) => assert!(msg.contains("feature 12"), "{msg}"),
        other => panic!("got: {other:?}"),
    }
}

#[test]
fn validation_fails_on_coefficient_count() {
    let mut v = load_fixture_value("model_linear.json");

    v.pointer_mut("/model/coefficients")
        .and_then(|x| x.as_array_mut())
        .expect("coefficients array")
        .push(Value::from(0.5));

    let err = model_err(v);
    assert!(matches!(err, ReadError::Validation(_)), "got: {err:?}");
}

#[test]
fn validation_fails_on_scaler_length() {
    let mut v = load_fixture_value("scaler.json");

    v.pointer_mut("/scaler/mean")
        .and_then(|x| x.as_array_mut())
        .expect("mean array")
        .truncate(11);

    let err = scaler_err(v);
    assert!(matches!(err, ReadError::Validation(_)), "got: {err:?}");
}

#[test]
fn validation_fails_on_feature_name_count() {
    let mut v = load_fixture_value("scaler.json");

    v.pointer_mut("/meta/feature_names")
        .and_then(|x| x.as_array_mut())
        .expect("feature_names array")
        .pop();

    let err = scaler_err(v);
    assert!(matches!(err, ReadError::Validation(_)), "got: {err:?}");
}

#[test]
fn future_format_version_rejected() {
    let mut v = load_fixture_value("scaler.json");
    v["format_version"] = Value::from(2u32);

    let err = scaler_err(v);
    assert!(
        matches!(
            err,
            ReadError::UnsupportedVersion {
                found: 2,
                supported: 1
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn missing_kind_is_json_error() {
    let mut v = load_fixture_value("model_linear.json");
    v.as_object_mut().expect("object").remove("kind");

    let err = model_err(v);
    assert!(matches!(err, ReadError::Json(_)), "got: {err:?}");
}
