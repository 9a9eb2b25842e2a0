//! Conversion from JSON to typed Avro values.
//!
//! [`parse_value`] interprets a JSON tree against an expected schema. Named
//! references are resolved through an [`Environment`] as they are reached, and
//! unions are handed to a [`UnionPolicy`] because their JSON shape depends on
//! context: live data uses the tagged form, field defaults use the bare form
//! of the first branch (see [`FirstBranchDefaults`](crate::value::FirstBranchDefaults)).

use std::collections::HashMap;

use serde_json::{Number, Value};

use crate::error::{AvroError, Result};
use crate::schema::{AvroSchema, Environment, UnionSchema};
use crate::value::bytes::bytes_from_json_string;
use crate::value::AvroValue;

/// Decides how a JSON value maps onto a union schema.
pub trait UnionPolicy {
    /// Parse `json` against `union`, recursing through [`parse_value`] with
    /// this policy for the selected branch.
    fn parse_union(
        &self,
        env: &Environment,
        union: &UnionSchema,
        json: &Value,
    ) -> Result<AvroValue>;
}

/// Union policy for live data.
///
/// A union value is either bare JSON `null` (selecting the union's `null`
/// branch) or a single-key object whose key is the branch's type name or
/// fully qualified name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedUnions;

impl UnionPolicy for TaggedUnions {
    fn parse_union(
        &self,
        env: &Environment,
        union: &UnionSchema,
        json: &Value,
    ) -> Result<AvroValue> {
        match json {
            Value::Null => {
                let branch = union
                    .options()
                    .iter()
                    .find(|option| matches!(option, AvroSchema::Null))
                    .ok_or_else(|| AvroError::mismatch(describe_union(union), "null"))?;
                Ok(AvroValue::Union(
                    union.clone(),
                    Box::new(branch.clone()),
                    Box::new(AvroValue::Null),
                ))
            }
            Value::Object(obj) if obj.len() == 1 => {
                let Some((key, inner)) = obj.iter().next() else {
                    return Err(AvroError::mismatch(describe_union(union), "empty object"));
                };
                let (_, branch) = union
                    .branch_named(key)
                    .ok_or_else(|| AvroError::UnknownUnionBranch(key.clone()))?;
                let value = parse_value(self, env, branch, inner)?;
                Ok(AvroValue::Union(
                    union.clone(),
                    Box::new(branch.clone()),
                    Box::new(value),
                ))
            }
            other => Err(AvroError::mismatch(
                describe_union(union),
                describe_json(other),
            )),
        }
    }
}

/// Parse a JSON value against `schema`, handling unions with `policy`.
pub fn parse_value<P: UnionPolicy + ?Sized>(
    policy: &P,
    env: &Environment,
    schema: &AvroSchema,
    json: &Value,
) -> Result<AvroValue> {
    match schema {
        AvroSchema::Named(name) => {
            let resolved = env.resolve(name)?;
            parse_value(policy, env, resolved, json)
        }
        AvroSchema::Union(union) => policy.parse_union(env, union, json),
        _ => parse_non_union(policy, env, schema, json),
    }
}

fn parse_non_union<P: UnionPolicy + ?Sized>(
    policy: &P,
    env: &Environment,
    schema: &AvroSchema,
    json: &Value,
) -> Result<AvroValue> {
    match (json, schema) {
        (Value::Null, AvroSchema::Null) => Ok(AvroValue::Null),

        (Value::Bool(b), AvroSchema::Boolean) => Ok(AvroValue::Boolean(*b)),

        // Integer types truncate toward zero
        (Value::Number(n), AvroSchema::Int) => {
            let v = integral(n, "int")?;
            let v = i32::try_from(v).map_err(|_| AvroError::NumberOutOfRange {
                value: n.to_string(),
                target: "int",
            })?;
            Ok(AvroValue::Int(v))
        }
        (Value::Number(n), AvroSchema::Long) => Ok(AvroValue::Long(integral(n, "long")?)),

        (Value::Number(n), AvroSchema::Float) => Ok(AvroValue::Float(floating(n)? as f32)),
        (Value::Number(n), AvroSchema::Double) => Ok(AvroValue::Double(floating(n)?)),

        (Value::String(s), AvroSchema::String) => Ok(AvroValue::String(s.clone())),

        (Value::String(s), AvroSchema::Bytes) => Ok(AvroValue::Bytes(bytes_from_json_string(s)?)),

        (Value::String(s), AvroSchema::Fixed(fixed)) => {
            let bytes = bytes_from_json_string(s)?;
            if bytes.len() != fixed.size {
                return Err(AvroError::FixedSizeMismatch {
                    name: fixed.name.to_string(),
                    expected: fixed.size,
                    actual: bytes.len(),
                });
            }
            Ok(AvroValue::Fixed(fixed.clone(), bytes))
        }

        (Value::String(s), AvroSchema::Enum(enum_schema)) => {
            let index =
                enum_schema
                    .symbol_index(s)
                    .ok_or_else(|| AvroError::UnknownEnumSymbol {
                        symbol: s.clone(),
                        enum_name: enum_schema.name.to_string(),
                    })?;
            Ok(AvroValue::Enum(enum_schema.clone(), index, s.clone()))
        }

        (Value::Array(arr), AvroSchema::Array(item_schema)) => {
            let items = arr
                .iter()
                .map(|item| parse_value(policy, env, item_schema, item))
                .collect::<Result<Vec<AvroValue>>>()?;
            Ok(AvroValue::Array(items))
        }

        (Value::Object(obj), AvroSchema::Map(value_schema)) => {
            let entries = obj
                .iter()
                .map(|(k, v)| -> Result<(String, AvroValue)> {
                    Ok((k.clone(), parse_value(policy, env, value_schema, v)?))
                })
                .collect::<Result<HashMap<String, AvroValue>>>()?;
            Ok(AvroValue::Map(entries))
        }

        (Value::Object(obj), AvroSchema::Record(record_schema)) => {
            let fields = record_schema
                .fields
                .iter()
                .map(|field| -> Result<(String, AvroValue)> {
                    let value = match (obj.get(&field.name), &field.default) {
                        (Some(v), _) => parse_value(policy, env, &field.schema, v)?,
                        (None, Some(default)) => default.clone(),
                        (None, None) => return Err(AvroError::MissingField(field.name.clone())),
                    };
                    Ok((field.name.clone(), value))
                })
                .collect::<Result<HashMap<String, AvroValue>>>()?;
            Ok(AvroValue::Record(record_schema.clone(), fields))
        }

        (json, schema) => Err(AvroError::mismatch(schema.describe(), describe_json(json))),
    }
}

/// Parse a live JSON value, using tagged unions.
///
/// # Example
/// ```
/// use avro_model::schema::{parse_schema, Environment};
/// use avro_model::value::{json_to_avro_value, AvroValue};
/// use serde_json::json;
///
/// let schema = parse_schema(r#"{"type": "array", "items": "long"}"#).unwrap();
/// let env = Environment::build(&schema);
/// let value = json_to_avro_value(&env, &schema, &json!([1, 2])).unwrap();
/// assert_eq!(value, AvroValue::Array(vec![AvroValue::Long(1), AvroValue::Long(2)]));
/// ```
pub fn json_to_avro_value(env: &Environment, schema: &AvroSchema, json: &Value) -> Result<AvroValue> {
    parse_value(&TaggedUnions, env, schema, json)
}

/// Decode JSON bytes into a value, using tagged unions.
pub fn decode_value(env: &Environment, schema: &AvroSchema, json: &[u8]) -> Result<AvroValue> {
    let value: Value = serde_json::from_slice(json)?;
    json_to_avro_value(env, schema, &value)
}

/// Integral part of a JSON number, truncating toward zero.
fn integral(n: &Number, target: &'static str) -> Result<i64> {
    if let Some(v) = n.as_i64() {
        return Ok(v);
    }
    let truncated = n.as_f64().map(f64::trunc);
    match truncated {
        Some(t) if t >= i64::MIN as f64 && t < i64::MAX as f64 => Ok(t as i64),
        _ => Err(AvroError::NumberOutOfRange {
            value: n.to_string(),
            target,
        }),
    }
}

fn floating(n: &Number) -> Result<f64> {
    n.as_f64().ok_or_else(|| AvroError::NumberOutOfRange {
        value: n.to_string(),
        target: "double",
    })
}

fn describe_union(union: &UnionSchema) -> String {
    let names: Vec<String> = union
        .options()
        .iter()
        .map(|o| o.type_name().to_string())
        .collect();
    format!("union [{}]", names.join(", "))
}

fn describe_json(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
