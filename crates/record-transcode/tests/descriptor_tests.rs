//! Descriptor invariants, rendering and descriptor JSON.

use record_transcode::{FieldDescriptor, TranscodeError, TypeDescriptor, TypeKind};

fn user() -> TypeDescriptor {
    TypeDescriptor::record(
        "user",
        vec![
            FieldDescriptor::new("id", TypeDescriptor::Long),
            FieldDescriptor::new("tags", TypeDescriptor::array(TypeDescriptor::String)),
            FieldDescriptor::new("email", TypeDescriptor::nullable(TypeDescriptor::String)),
            FieldDescriptor::new("scores", TypeDescriptor::map(TypeDescriptor::Double)),
        ],
    )
}

#[test]
fn display_renders_type_expression() {
    assert_eq!(
        user().to_string(),
        "record user { id: long, tags: array<string>, email: union<null, string>, scores: map<double> }"
    );
    assert_eq!(TypeDescriptor::record("empty", vec![]).to_string(), "record empty {}");
    assert_eq!(
        TypeDescriptor::Enum {
            name: "suit".into(),
            symbols: vec!["SPADES".into(), "HEARTS".into()],
        }
        .to_string(),
        "enum suit {SPADES, HEARTS}"
    );
    assert_eq!(
        TypeDescriptor::Fixed {
            name: "md5".into(),
            size: 16,
        }
        .to_string(),
        "fixed md5(16)"
    );
}

#[test]
fn kind_and_nullability() {
    assert_eq!(user().kind(), TypeKind::Record);
    assert!(TypeDescriptor::nullable(TypeDescriptor::Int).is_nullable());
    assert!(TypeDescriptor::union(vec![TypeDescriptor::Int, TypeDescriptor::Null]).is_nullable());
    assert!(!TypeDescriptor::union(vec![TypeDescriptor::Int, TypeDescriptor::String]).is_nullable());
    assert!(!TypeDescriptor::Null.is_nullable());
}

#[test]
fn valid_descriptor_passes() {
    user().validate().unwrap();
}

#[test]
fn duplicate_field_names_rejected() {
    let descriptor = TypeDescriptor::record(
        "dup",
        vec![
            FieldDescriptor::new("a", TypeDescriptor::Int),
            FieldDescriptor::new("a", TypeDescriptor::Long),
        ],
    );
    let err = descriptor.validate().unwrap_err();
    assert!(matches!(err, TranscodeError::InvalidDescriptor(ref msg) if msg.contains("'a'")));
}

#[test]
fn two_null_branches_rejected() {
    let descriptor = TypeDescriptor::array(TypeDescriptor::union(vec![
        TypeDescriptor::Null,
        TypeDescriptor::Int,
        TypeDescriptor::Null,
    ]));
    assert!(matches!(
        descriptor.validate(),
        Err(TranscodeError::InvalidDescriptor(_))
    ));
}

#[test]
fn nested_union_rejected() {
    let descriptor = TypeDescriptor::union(vec![
        TypeDescriptor::Int,
        TypeDescriptor::nullable(TypeDescriptor::String),
    ]);
    assert!(matches!(
        descriptor.validate(),
        Err(TranscodeError::InvalidDescriptor(_))
    ));
}

#[test]
fn invalid_descriptor_found_deep_in_tree() {
    let descriptor = TypeDescriptor::map(TypeDescriptor::record(
        "inner",
        vec![
            FieldDescriptor::new("x", TypeDescriptor::Int),
            FieldDescriptor::new("x", TypeDescriptor::Int),
        ],
    ));
    assert!(descriptor.validate().is_err());
}

#[test]
fn descriptor_json_is_tagged() {
    let json = serde_json::to_value(TypeDescriptor::nullable(TypeDescriptor::array(
        TypeDescriptor::Long,
    )))
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "type": "union",
            "branches": [
                {"type": "null"},
                {"type": "array", "items": {"type": "long"}}
            ]
        })
    );
}

#[test]
fn descriptor_json_reloads() {
    let json = serde_json::to_string(&user()).unwrap();
    let reloaded: TypeDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, user());
}
