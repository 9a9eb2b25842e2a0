//! Tests for Avro schema types, parsing, environments and matching.

use avro_model::schema::*;
use avro_model::{AvroError, AvroValue};

// ============================================================================
// Schema Type Tests
// ============================================================================

#[test]
fn test_primitive_types() {
    assert!(AvroSchema::Null.is_primitive());
    assert!(AvroSchema::Boolean.is_primitive());
    assert!(AvroSchema::Int.is_primitive());
    assert!(AvroSchema::Long.is_primitive());
    assert!(AvroSchema::Float.is_primitive());
    assert!(AvroSchema::Double.is_primitive());
    assert!(AvroSchema::Bytes.is_primitive());
    assert!(AvroSchema::String.is_primitive());
    assert!(!AvroSchema::named("Foo").is_primitive());
}

#[test]
fn test_named_types() {
    let record = AvroSchema::Record(RecordSchema::new("R", vec![]));
    assert!(record.is_named());
    assert_eq!(record.name().map(TypeName::as_str), Some("R"));
    assert!(!AvroSchema::named("R").is_named());
    assert_eq!(AvroSchema::named("R").fullname(), Some(TypeName::from("R")));
    assert_eq!(AvroSchema::Int.name(), None);
}

#[test]
fn test_nullable_union() {
    let nullable = AvroSchema::union(vec![AvroSchema::Null, AvroSchema::Int]).unwrap();
    let not_nullable = AvroSchema::union(vec![AvroSchema::Long, AvroSchema::Int]).unwrap();
    assert!(nullable.is_nullable());
    assert!(!not_nullable.is_nullable());
    assert!(!AvroSchema::Null.is_nullable());
}

// ============================================================================
// Parser Tests - Primitive Types
// ============================================================================

#[test]
fn test_parse_primitive_string_schemas() {
    assert_eq!(parse_schema(r#""null""#).unwrap(), AvroSchema::Null);
    assert_eq!(parse_schema(r#""boolean""#).unwrap(), AvroSchema::Boolean);
    assert_eq!(parse_schema(r#""int""#).unwrap(), AvroSchema::Int);
    assert_eq!(parse_schema(r#""long""#).unwrap(), AvroSchema::Long);
    assert_eq!(parse_schema(r#""float""#).unwrap(), AvroSchema::Float);
    assert_eq!(parse_schema(r#""double""#).unwrap(), AvroSchema::Double);
    assert_eq!(parse_schema(r#""bytes""#).unwrap(), AvroSchema::Bytes);
    assert_eq!(parse_schema(r#""string""#).unwrap(), AvroSchema::String);
}

#[test]
fn test_parse_primitive_object_schemas() {
    assert_eq!(
        parse_schema(r#"{"type": "null"}"#).unwrap(),
        AvroSchema::Null
    );
    assert_eq!(parse_schema(r#"{"type": "int"}"#).unwrap(), AvroSchema::Int);
    assert_eq!(
        parse_schema(r#"{"type": "string"}"#).unwrap(),
        AvroSchema::String
    );
}

#[test]
fn test_parse_invalid_json() {
    assert!(matches!(parse_schema("{not json"), Err(AvroError::Json(_))));
}

// ============================================================================
// Parser Tests - Record Schema
// ============================================================================

#[test]
fn test_parse_simple_record() {
    let json = r#"{
        "type": "record",
        "name": "User",
        "fields": [
            {"name": "id", "type": "long"},
            {"name": "name", "type": "string"}
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    match schema {
        AvroSchema::Record(r) => {
            assert_eq!(r.name, "User");
            assert_eq!(r.fields.len(), 2);
            assert_eq!(r.fields[0].name, "id");
            assert_eq!(r.fields[0].schema, AvroSchema::Long);
            assert_eq!(r.fields[1].name, "name");
            assert_eq!(r.fields[1].schema, AvroSchema::String);
        }
        _ => panic!("Expected Record schema"),
    }
}

#[test]
fn test_parse_record_with_namespace_and_aliases() {
    let json = r#"{
        "type": "record",
        "name": "User",
        "namespace": "com.example",
        "aliases": ["Person"],
        "doc": "A user record",
        "order": "descending",
        "fields": [
            {"name": "id", "type": "long", "aliases": ["uid"], "doc": "key", "order": "ignore"}
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    match schema {
        AvroSchema::Record(r) => {
            assert_eq!(r.name, "User");
            assert_eq!(r.namespace, Some("com.example".to_string()));
            assert_eq!(r.fullname(), "com.example.User");
            assert_eq!(r.aliases, vec![TypeName::from("Person")]);
            assert_eq!(r.doc, Some("A user record".to_string()));
            assert_eq!(r.order, FieldOrder::Descending);

            let field = r.field("id").unwrap();
            assert_eq!(field.aliases, vec!["uid".to_string()]);
            assert_eq!(field.doc, Some("key".to_string()));
            assert_eq!(field.order, FieldOrder::Ignore);
        }
        _ => panic!("Expected Record schema"),
    }
}

#[test]
fn test_parse_record_with_field_defaults() {
    let json = r#"{
        "type": "record",
        "name": "Config",
        "fields": [
            {"name": "count", "type": "int", "default": 0},
            {"name": "enabled", "type": "boolean", "default": true},
            {"name": "ratio", "type": "double", "default": 0.5},
            {"name": "tags", "type": {"type": "array", "items": "string"}, "default": ["a"]},
            {"name": "raw", "type": "bytes", "default": "ÿ"}
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    match schema {
        AvroSchema::Record(r) => {
            assert_eq!(r.fields[0].default, Some(AvroValue::Int(0)));
            assert_eq!(r.fields[1].default, Some(AvroValue::Boolean(true)));
            assert_eq!(r.fields[2].default, Some(AvroValue::Double(0.5)));
            assert_eq!(
                r.fields[3].default,
                Some(AvroValue::Array(vec![AvroValue::String("a".to_string())]))
            );
            assert_eq!(r.fields[4].default, Some(AvroValue::Bytes(vec![255])));
        }
        _ => panic!("Expected Record schema"),
    }
}

#[test]
fn test_parse_record_with_union_defaults() {
    let json = r#"{
        "type": "record",
        "name": "Opt",
        "fields": [
            {"name": "a", "type": ["null", "string"], "default": null},
            {"name": "b", "type": ["string", "null"], "default": "x"}
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    let AvroSchema::Record(r) = schema else {
        panic!("Expected Record schema");
    };

    match r.fields[0].default.as_ref().unwrap() {
        AvroValue::Union(_, branch, value) => {
            assert_eq!(**branch, AvroSchema::Null);
            assert_eq!(**value, AvroValue::Null);
        }
        other => panic!("Expected union default, got {:?}", other),
    }
    match r.fields[1].default.as_ref().unwrap() {
        AvroValue::Union(_, branch, value) => {
            assert_eq!(**branch, AvroSchema::String);
            assert_eq!(**value, AvroValue::String("x".to_string()));
        }
        other => panic!("Expected union default, got {:?}", other),
    }
}

#[test]
fn test_parse_record_with_mismatched_default() {
    let json = r#"{
        "type": "record",
        "name": "Bad",
        "fields": [{"name": "a", "type": ["null", "string"], "default": "x"}]
    }"#;
    assert!(matches!(
        parse_schema(json),
        Err(AvroError::TypeMismatch { .. })
    ));
}

#[test]
fn test_parse_recursive_record_default_unsupported() {
    let json = r#"{
        "type": "record",
        "name": "LinkedList",
        "fields": [
            {"name": "value", "type": "int"},
            {"name": "next", "type": ["LinkedList", "null"], "default": {"value": 0}}
        ]
    }"#;
    let err = parse_schema(json).unwrap_err();
    assert!(matches!(err, AvroError::UnsupportedDefault(_)));
    assert!(err
        .to_string()
        .contains("not supported for aliased or recursive types"));
}

#[test]
fn test_parse_nested_record() {
    let json = r#"{
        "type": "record",
        "name": "Person",
        "fields": [
            {"name": "name", "type": "string"},
            {
                "name": "address",
                "type": {
                    "type": "record",
                    "name": "Address",
                    "fields": [
                        {"name": "street", "type": "string"},
                        {"name": "city", "type": "string"}
                    ]
                }
            }
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    match schema {
        AvroSchema::Record(r) => {
            assert_eq!(r.name, "Person");
            assert_eq!(r.fields.len(), 2);
            match &r.fields[1].schema {
                AvroSchema::Record(addr) => {
                    assert_eq!(addr.name, "Address");
                    assert_eq!(addr.fields.len(), 2);
                }
                _ => panic!("Expected nested Record schema"),
            }
        }
        _ => panic!("Expected Record schema"),
    }
}

#[test]
fn test_parse_record_missing_fields() {
    assert!(parse_schema(r#"{"type": "record", "name": "R"}"#).is_err());
    assert!(parse_schema(r#"{"type": "record", "fields": []}"#).is_err());
    assert!(parse_schema(r#"{"type": "record", "name": "R", "fields": [{"type": "int"}]}"#).is_err());
    assert!(parse_schema(r#"{"type": "record", "name": "R", "fields": [{"name": "a"}]}"#).is_err());
}

// ============================================================================
// Parser Tests - Enum, Fixed, Array, Map, Union
// ============================================================================

#[test]
fn test_parse_enum() {
    let json = r#"{
        "type": "enum",
        "name": "Color",
        "namespace": "com.example",
        "aliases": ["Colour"],
        "doc": "Primary colors",
        "symbols": ["RED", "GREEN", "BLUE"]
    }"#;

    let schema = parse_schema(json).unwrap();
    match schema {
        AvroSchema::Enum(e) => {
            assert_eq!(e.name, "Color");
            assert_eq!(e.fullname(), "com.example.Color");
            assert_eq!(e.aliases, vec![TypeName::from("Colour")]);
            assert_eq!(e.doc, Some("Primary colors".to_string()));
            assert_eq!(e.symbols, vec!["RED", "GREEN", "BLUE"]);
            assert_eq!(e.symbol_at(0), Some("RED"));
        }
        _ => panic!("Expected Enum schema"),
    }
}

#[test]
fn test_parse_enum_requires_symbols() {
    assert!(parse_schema(r#"{"type": "enum", "name": "E"}"#).is_err());
    assert!(parse_schema(r#"{"type": "enum", "name": "E", "symbols": [1]}"#).is_err());
}

#[test]
fn test_parse_fixed() {
    let json = r#"{"type": "fixed", "name": "MD5", "namespace": "hash", "size": 16}"#;
    match parse_schema(json).unwrap() {
        AvroSchema::Fixed(f) => {
            assert_eq!(f.name, "MD5");
            assert_eq!(f.namespace, Some("hash".to_string()));
            assert_eq!(f.size, 16);
            assert!(f.aliases.is_empty());
        }
        _ => panic!("Expected Fixed schema"),
    }
}

#[test]
fn test_parse_array_and_map() {
    assert_eq!(
        parse_schema(r#"{"type": "array", "items": "int"}"#).unwrap(),
        AvroSchema::Array(Box::new(AvroSchema::Int))
    );
    assert_eq!(
        parse_schema(r#"{"type": "map", "values": ["null", "long"]}"#).unwrap(),
        AvroSchema::Map(Box::new(
            AvroSchema::union(vec![AvroSchema::Null, AvroSchema::Long]).unwrap()
        ))
    );
    assert!(parse_schema(r#"{"type": "array"}"#).is_err());
    assert!(parse_schema(r#"{"type": "map"}"#).is_err());
}

#[test]
fn test_parse_union_keeps_order() {
    let schema = parse_schema(r#"["string", "null", "Thing"]"#).unwrap();
    match schema {
        AvroSchema::Union(u) => {
            assert_eq!(
                u.options(),
                &[AvroSchema::String, AvroSchema::Null, AvroSchema::named("Thing")]
            );
        }
        _ => panic!("Expected Union schema"),
    }
}

#[test]
fn test_parse_empty_union_fails() {
    assert!(parse_schema("[]").is_err());
}

#[test]
fn test_unknown_type_keyword_names_offender() {
    let err = parse_schema(r#"{"type": "tuple"}"#).unwrap_err();
    assert!(err.to_string().contains("tuple"));
}

// ============================================================================
// Schema JSON Round Trip
// ============================================================================

#[test]
fn test_encode_decode_round_trip() {
    let json = r#"{
        "type": "record",
        "name": "Event",
        "namespace": "com.example",
        "doc": "An event",
        "fields": [
            {"name": "id", "type": "long"},
            {"name": "kind", "type": {"type": "enum", "name": "Kind", "symbols": ["A", "B"]}, "default": "B"},
            {"name": "hash", "type": {"type": "fixed", "name": "Hash", "size": 2}, "default": "ab"},
            {"name": "label", "type": ["string", "null"], "default": "none"},
            {"name": "attrs", "type": {"type": "map", "values": "int"}, "default": {"x": 1}},
            {"name": "parent", "type": ["null", "Event"], "default": null, "order": "ignore"}
        ]
    }"#;

    let schema = parse_schema(json).unwrap();
    let encoded = encode_schema(&schema);
    let decoded = decode_schema(&encoded).unwrap();
    assert_eq!(decoded, schema);

    let AvroSchema::Record(r) = decoded else {
        panic!("Expected Record schema");
    };
    assert_eq!(r.doc, Some("An event".to_string()));
    assert_eq!(r.fields[5].order, FieldOrder::Ignore);
}

#[test]
fn test_to_json_shapes() {
    let schema = AvroSchema::Record(
        RecordSchema::new(
            "R",
            vec![FieldSchema::new(
                "u",
                AvroSchema::union(vec![AvroSchema::Null, AvroSchema::named("R")]).unwrap(),
            )],
        )
        .with_namespace("ns"),
    );
    assert_eq!(
        schema.to_json_value(),
        serde_json::json!({
            "type": "record",
            "name": "R",
            "namespace": "ns",
            "fields": [{"name": "u", "type": ["null", "R"]}]
        })
    );
}

// ============================================================================
// Environment Tests
// ============================================================================

#[test]
fn test_environment_qualified_and_bare_names() {
    let schema = parse_schema(
        r#"{"type": "record", "name": "Foo", "namespace": "ns", "fields": []}"#,
    )
    .unwrap();
    let env = Environment::build(&schema);

    assert_eq!(env.get("Foo"), Some(&schema));
    assert_eq!(env.get("ns.Foo"), Some(&schema));
    assert!(env.get("Bar").is_none());
}

#[test]
fn test_environment_from_parsed_document() {
    let schema = parse_schema(
        r#"{
        "type": "record",
        "name": "Outer",
        "fields": [
            {"name": "e", "type": {"type": "enum", "name": "E", "aliases": ["OldE"], "symbols": ["X"]}},
            {"name": "f", "type": {"type": "array", "items": {"type": "fixed", "name": "F", "size": 1}}},
            {"name": "u", "type": ["null", {"type": "map", "values": {"type": "record", "name": "In", "fields": []}}]}
        ]
    }"#,
    )
    .unwrap();
    let env = Environment::build(&schema);

    let mut names: Vec<&str> = env.names().map(TypeName::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["E", "F", "In", "OldE", "Outer"]);
}

// ============================================================================
// Matching Tests
// ============================================================================

#[test]
fn test_named_reference_matches() {
    let x = AvroSchema::Record(RecordSchema::new("X", vec![]));
    let y = AvroSchema::Record(RecordSchema::new("Y", vec![]));
    assert!(schemas_match(&AvroSchema::named("X"), &x));
    assert!(!schemas_match(&AvroSchema::named("X"), &y));
}

#[test]
fn test_match_parsed_writer_and_reader() {
    let writer = parse_schema(
        r#"{"type": "record", "name": "P", "fields": [
            {"name": "a", "type": "int"},
            {"name": "b", "type": ["null", "string"]}
        ]}"#,
    )
    .unwrap();
    let reader = parse_schema(
        r#"{"type": "record", "name": "P", "doc": "renamed fields", "fields": [
            {"name": "first", "type": "int"},
            {"name": "second", "type": ["null", "string"], "default": null}
        ]}"#,
    )
    .unwrap();
    assert!(schemas_match(&writer, &reader));
    assert!(schemas_match(&writer, &writer));
}
