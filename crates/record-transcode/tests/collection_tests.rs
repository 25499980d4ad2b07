//! Array and map conversion.

use std::collections::BTreeMap;

use record_transcode::{
    transcode, Container, InputValue, OutputValue, PathSegment, Shape, TranscodeError,
    TypeDescriptor, TypeKind,
};

fn mapping(entries: &[(&str, InputValue)]) -> InputValue {
    InputValue::Mapping(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn array_preserves_order() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Long);
    let input = InputValue::Sequence(vec![3i64.into(), 1i64.into(), 2i64.into()]);
    let out = transcode(&descriptor, &input).unwrap();
    assert_eq!(
        out,
        OutputValue::Array(vec![
            OutputValue::Long(3),
            OutputValue::Long(1),
            OutputValue::Long(2),
        ])
    );
}

#[test]
fn empty_array_is_empty_not_null() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::String);
    let out = transcode(&descriptor, &InputValue::Sequence(vec![])).unwrap();
    assert_eq!(out, OutputValue::Array(vec![]));
}

#[test]
fn array_elements_are_converted() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::String);
    let input = InputValue::Sequence(vec![1i64.into(), true.into()]);
    let out = transcode(&descriptor, &input).unwrap();
    assert_eq!(
        out,
        OutputValue::Array(vec![
            OutputValue::String("1".into()),
            OutputValue::String("true".into()),
        ])
    );
}

#[test]
fn failing_element_fails_whole_array_with_index() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Long);
    let input = InputValue::Sequence(vec![1i64.into(), 2i64.into(), "three".into()]);
    let err = transcode(&descriptor, &input).unwrap_err();

    assert_eq!(err.path().unwrap().segments(), &[PathSegment::Index(2)]);
    assert_eq!(
        err.root_cause(),
        &TranscodeError::TypeMismatch {
            expected: TypeKind::Long,
            found: Shape::Text,
        }
    );
    assert_eq!(err.to_string(), "at [2]: type mismatch: expected long, found text");
}

#[test]
fn array_requires_sequence() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::Long);
    let err = transcode(&descriptor, &InputValue::Int64(1)).unwrap_err();
    assert_eq!(
        err,
        TranscodeError::TypeMismatch {
            expected: TypeKind::Array,
            found: Shape::Int64,
        }
    );
}

#[test]
fn nested_arrays() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::array(TypeDescriptor::Int));
    let input = InputValue::Sequence(vec![
        InputValue::Sequence(vec![1i64.into()]),
        InputValue::Sequence(vec![]),
    ]);
    let out = transcode(&descriptor, &input).unwrap();
    assert_eq!(
        out,
        OutputValue::Array(vec![
            OutputValue::Array(vec![OutputValue::Int(1)]),
            OutputValue::Array(vec![]),
        ])
    );
}

// ============================================================================
// Maps
// ============================================================================

#[test]
fn map_preserves_key_set() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::Long);
    let input = mapping(&[("a", 1i64.into()), ("b", 2i64.into()), ("", 3i64.into())]);
    let out = transcode(&descriptor, &input).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("a".to_string(), OutputValue::Long(1));
    expected.insert("b".to_string(), OutputValue::Long(2));
    expected.insert("".to_string(), OutputValue::Long(3));
    assert_eq!(out, OutputValue::Map(expected));
}

#[test]
fn empty_map() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::Long);
    let out = transcode(&descriptor, &mapping(&[])).unwrap();
    assert_eq!(out, OutputValue::Map(BTreeMap::new()));
}

#[test]
fn map_of_arrays() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::array(TypeDescriptor::String));
    let input = mapping(&[("tags", InputValue::Sequence(vec!["x".into(), "y".into()]))]);
    let out = transcode(&descriptor, &input).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert(
        "tags".to_string(),
        OutputValue::Array(vec![
            OutputValue::String("x".into()),
            OutputValue::String("y".into()),
        ]),
    );
    assert_eq!(out, OutputValue::Map(expected));
}

#[test]
fn failing_map_value_reports_key() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::Boolean);
    let input = mapping(&[("ok", true.into()), ("color", "red".into())]);
    let err = transcode(&descriptor, &input).unwrap_err();

    assert_eq!(
        err.path().unwrap().segments(),
        &[PathSegment::Key("color".into())]
    );
    assert_eq!(err.path().unwrap().to_string(), r#"["color"]"#);
}

#[test]
fn container_converts_as_map_of_its_fields() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::Long);
    let input = InputValue::Container(Container::new().with("x", 1i64).with("y", 2i64));
    let out = transcode(&descriptor, &input).unwrap();

    let mut expected = BTreeMap::new();
    expected.insert("x".to_string(), OutputValue::Long(1));
    expected.insert("y".to_string(), OutputValue::Long(2));
    assert_eq!(out, OutputValue::Map(expected));
}

#[test]
fn map_requires_string_keyed_input() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::Long);
    let err = transcode(&descriptor, &InputValue::Sequence(vec![])).unwrap_err();
    assert_eq!(
        err,
        TranscodeError::TypeMismatch {
            expected: TypeKind::Map,
            found: Shape::Sequence,
        }
    );
}
