//! Avro schema model and JSON conversion core
//!
//! This library represents Avro schemas as a typed in-memory structure,
//! converts schemas and the values they describe to and from JSON, resolves
//! named type references through an environment built from a root schema,
//! and decides whether two schemas match for deconfliction.
//!
//! Everything here is a pure transformation over immutable inputs: schemas,
//! environments and values can be shared freely across threads.
//!
//! # Example
//! ```
//! use avro_model::{encode_value, json_to_avro_value, parse_schema, AvroValue, Environment};
//! use serde_json::json;
//!
//! let schema = parse_schema(r#"{
//!     "type": "record",
//!     "name": "Node",
//!     "namespace": "com.example",
//!     "fields": [
//!         {"name": "value", "type": "int"},
//!         {"name": "next", "type": ["null", "Node"], "default": null}
//!     ]
//! }"#).unwrap();
//!
//! let env = Environment::build(&schema);
//! let value = json_to_avro_value(&env, &schema, &json!({
//!     "value": 1,
//!     "next": {"Node": {"value": 2}}
//! })).unwrap();
//!
//! assert_eq!(value.field("value"), Some(&AvroValue::Int(1)));
//! let round_trip = serde_json::from_slice::<serde_json::Value>(&encode_value(&value)).unwrap();
//! assert_eq!(round_trip, json!({"value": 1, "next": {"Node": {"value": 2, "next": null}}}));
//! ```

pub mod error;
pub mod schema;
pub mod value;

// Re-export main types
pub use error::{first_success, AvroError, Result};
pub use schema::{
    decode_schema, encode_schema, parse_schema, parse_schema_with_options, schemas_match,
    AvroSchema, EnumSchema, Environment, FieldOrder, FieldSchema, FixedSchema, RecordSchema,
    SchemaParser, TypeName, UnionSchema,
};
pub use value::{
    decode_value, encode_value, json_to_avro_value, parse_default, parse_value, AvroValue,
    FirstBranchDefaults, TaggedUnions, UnionPolicy,
};
