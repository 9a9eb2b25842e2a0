//! Typed Avro values and their JSON encoding.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::schema::{AvroSchema, EnumSchema, FixedSchema, RecordSchema, UnionSchema};
use crate::value::bytes::bytes_to_json_string;

/// A value parsed against an Avro schema.
///
/// Record, enum and fixed values carry the schema they were parsed against;
/// union values carry the full union, the selected branch schema (as declared
/// in the union), and the branch value.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// Byte array
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<AvroValue>),
    /// Map with string keys
    Map(HashMap<String, AvroValue>),
    /// Record with named fields
    Record(RecordSchema, HashMap<String, AvroValue>),
    /// Union branch (union, selected branch schema, branch value)
    Union(UnionSchema, Box<AvroSchema>, Box<AvroValue>),
    /// Fixed-size byte array
    Fixed(FixedSchema, Vec<u8>),
    /// Enum symbol (enum, symbol index, symbol)
    Enum(EnumSchema, usize, String),
}

/// How union values are written to JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnionEncoding {
    /// `null`, or a single-key object keyed by the branch type name
    Tagged,
    /// The bare branch value, as used for field defaults
    FirstBranch,
}

impl AvroValue {
    /// Look up a record field value.
    pub fn field(&self, name: &str) -> Option<&AvroValue> {
        match self {
            AvroValue::Record(_, fields) => fields.get(name),
            _ => None,
        }
    }

    /// Serialize the value to a JSON string.
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Serialize the value to JSON using the Avro JSON value encoding.
    ///
    /// Union values are written as `null` when the branch value is null, and
    /// otherwise as `{"<branch type name>": <value>}`. Non-finite floats have
    /// no JSON form and are written as `null`.
    ///
    /// # Example
    /// ```
    /// use avro_model::schema::{AvroSchema, UnionSchema};
    /// use avro_model::value::AvroValue;
    /// use serde_json::json;
    ///
    /// let union = UnionSchema::new(vec![AvroSchema::Null, AvroSchema::Int]).unwrap();
    /// let value = AvroValue::Union(union, Box::new(AvroSchema::Int), Box::new(AvroValue::Int(3)));
    /// assert_eq!(value.to_json_value(), json!({"int": 3}));
    /// ```
    pub fn to_json_value(&self) -> Value {
        self.encode(UnionEncoding::Tagged)
    }

    /// Serialize the value as a schema field default.
    ///
    /// Identical to [`to_json_value`](Self::to_json_value) except that union
    /// values are written as their bare branch value.
    pub fn to_default_json_value(&self) -> Value {
        self.encode(UnionEncoding::FirstBranch)
    }

    fn encode(&self, unions: UnionEncoding) -> Value {
        match self {
            AvroValue::Null => Value::Null,
            AvroValue::Boolean(b) => json!(b),
            AvroValue::Int(i) => json!(i),
            AvroValue::Long(l) => json!(l),
            AvroValue::Float(f) => json!(f64::from(*f)),
            AvroValue::Double(d) => json!(d),
            AvroValue::Bytes(bytes) | AvroValue::Fixed(_, bytes) => {
                Value::String(bytes_to_json_string(bytes))
            }
            AvroValue::String(s) => Value::String(s.clone()),
            AvroValue::Array(items) => {
                Value::Array(items.iter().map(|item| item.encode(unions)).collect())
            }
            AvroValue::Map(entries) | AvroValue::Record(_, entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.encode(unions)))
                    .collect::<Map<String, Value>>(),
            ),
            AvroValue::Enum(_, _, symbol) => Value::String(symbol.clone()),
            AvroValue::Union(_, branch, value) => match (unions, &**value) {
                (UnionEncoding::FirstBranch, value) => value.encode(unions),
                (UnionEncoding::Tagged, AvroValue::Null) => Value::Null,
                (UnionEncoding::Tagged, value) => {
                    let mut obj = Map::new();
                    obj.insert(branch.type_name().to_string(), value.encode(unions));
                    Value::Object(obj)
                }
            },
        }
    }
}

/// Encode a value as JSON bytes using the Avro JSON value encoding.
pub fn encode_value(value: &AvroValue) -> Vec<u8> {
    value.to_json().into_bytes()
}
