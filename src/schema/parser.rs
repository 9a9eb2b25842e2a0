//! JSON schema parser for Avro schemas.
//!
//! Parses Avro schema JSON into the AvroSchema type hierarchy. Named type
//! references are kept as [`AvroSchema::Named`] and resolved later through an
//! [`Environment`].

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{AvroError, Result};
use crate::schema::{
    AvroSchema, EnumSchema, Environment, FieldOrder, FieldSchema, FixedSchema, RecordSchema,
    TypeName, UnionSchema,
};
use crate::value::parse_default;

/// Parse an Avro schema from a JSON string.
///
/// # Example
/// ```
/// use avro_model::schema::{parse_schema, AvroSchema};
///
/// let schema = parse_schema(r#""string""#).unwrap();
/// assert_eq!(schema, AvroSchema::String);
/// ```
pub fn parse_schema(json: &str) -> Result<AvroSchema> {
    parse_schema_with_options(json, false)
}

/// Parse an Avro schema from a JSON string with validation options.
///
/// In strict mode:
/// - Union types cannot contain duplicate types
/// - Union types cannot contain nested unions
/// - Enum symbols must be unique
///
/// In permissive mode (default), these violations are logged but don't fail parsing.
///
/// # Example
/// ```
/// use avro_model::schema::parse_schema_with_options;
///
/// // Permissive mode - warnings only
/// let schema = parse_schema_with_options(r#"["int", "int"]"#, false).unwrap();
///
/// // Strict mode - fails on duplicate types in union
/// let result = parse_schema_with_options(r#"["int", "int"]"#, true);
/// assert!(result.is_err());
/// ```
pub fn parse_schema_with_options(json: &str, strict: bool) -> Result<AvroSchema> {
    let value: Value = serde_json::from_str(json)?;
    let schema = SchemaParser::new().with_strict(strict).parse(&value)?;
    debug!(type_name = %schema.type_name(), strict, "Parsed schema");
    Ok(schema)
}

/// Decode schema-definition JSON bytes.
pub fn decode_schema(json: &[u8]) -> Result<AvroSchema> {
    let value: Value = serde_json::from_slice(json)?;
    SchemaParser::new().parse(&value)
}

/// Encode a schema as schema-definition JSON bytes.
pub fn encode_schema(schema: &AvroSchema) -> Vec<u8> {
    schema.to_json().into_bytes()
}

/// Schema parser.
///
/// Field defaults are parsed while the schema is read, before any environment
/// exists, so a default whose value needs a named type lookup fails with
/// [`AvroError::UnsupportedDefault`].
#[derive(Debug, Default)]
pub struct SchemaParser {
    /// Whether to enforce strict schema validation
    strict_schema: bool,
}

impl SchemaParser {
    /// Create a new SchemaParser with default settings (permissive mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new SchemaParser with strict validation enabled.
    pub fn new_strict() -> Self {
        Self {
            strict_schema: true,
        }
    }

    /// Set whether to use strict schema validation.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    /// Parse a JSON value into an AvroSchema.
    pub fn parse(&self, value: &Value) -> Result<AvroSchema> {
        match value {
            Value::String(s) => Ok(self.parse_string_schema(s)),
            Value::Object(obj) => self.parse_object_schema(obj),
            Value::Array(arr) => self.parse_union_schema(arr),
            other => Err(AvroError::InvalidSchema(format!(
                "Expected string, object, or array, found: {}",
                other
            ))),
        }
    }

    /// Parse a primitive type or named type reference from a string.
    fn parse_string_schema(&self, s: &str) -> AvroSchema {
        match s {
            "null" => AvroSchema::Null,
            "boolean" => AvroSchema::Boolean,
            "int" => AvroSchema::Int,
            "long" => AvroSchema::Long,
            "float" => AvroSchema::Float,
            "double" => AvroSchema::Double,
            "bytes" => AvroSchema::Bytes,
            "string" => AvroSchema::String,
            name => AvroSchema::Named(TypeName::from(name)),
        }
    }

    /// Parse a complex type from a JSON object.
    ///
    /// A `logicalType` annotation is dropped. If the underlying `"type"` is a
    /// primitive keyword or a type name, the object reads as that string alone,
    /// so `{"type": "int", "logicalType": "date"}` is `int`. A `record`, `enum`,
    /// `array`, `map` or `fixed` base still decodes with its other keys, so a
    /// fixed-based `decimal` stays a `Fixed` rather than becoming a reference
    /// to a type named `"fixed"`.
    fn parse_object_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let type_str = match obj.get("type") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(AvroError::InvalidSchema(format!(
                    "'type' must be a string, found: {}",
                    other
                )))
            }
            None => return Err(AvroError::InvalidSchema("Missing 'type' field".to_string())),
        };

        // Logical types are not modelled: the annotation is dropped and the
        // object read as its underlying type
        if let Some(logical_type) = obj.get("logicalType") {
            debug!(logical_type = %logical_type, base = type_str, "Ignoring logical type");
            if !matches!(type_str, "record" | "enum" | "array" | "map" | "fixed") {
                return Ok(self.parse_string_schema(type_str));
            }
        }

        match type_str {
            // Primitive types can also appear as objects
            "null" => Ok(AvroSchema::Null),
            "boolean" => Ok(AvroSchema::Boolean),
            "int" => Ok(AvroSchema::Int),
            "long" => Ok(AvroSchema::Long),
            "float" => Ok(AvroSchema::Float),
            "double" => Ok(AvroSchema::Double),
            "bytes" => Ok(AvroSchema::Bytes),
            "string" => Ok(AvroSchema::String),

            // Complex types
            "record" => self.parse_record_schema(obj),
            "enum" => self.parse_enum_schema(obj),
            "array" => self.parse_array_schema(obj),
            "map" => self.parse_map_schema(obj),
            "fixed" => self.parse_fixed_schema(obj),

            other => Err(AvroError::UnknownType(other.to_string())),
        }
    }

    /// Parse a union schema from a JSON array.
    fn parse_union_schema(&self, arr: &[Value]) -> Result<AvroSchema> {
        let variants = arr
            .iter()
            .map(|v| self.parse(v))
            .collect::<Result<Vec<AvroSchema>>>()?;

        let union = UnionSchema::new(variants)?;

        if let Err(err) = union.validate() {
            if self.strict_schema {
                return Err(err);
            }
            warn!(error = %err, "Accepting union that violates Avro union rules");
        }

        Ok(AvroSchema::Union(union))
    }

    /// Parse a record schema.
    fn parse_record_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let name = required_str(obj, "name", "Record")?;

        let fields = match obj.get("fields") {
            Some(Value::Array(fields)) => fields
                .iter()
                .map(|f| self.parse_field_schema(f))
                .collect::<Result<Vec<FieldSchema>>>()?,
            _ => {
                return Err(AvroError::InvalidSchema(format!(
                    "Record '{}' missing 'fields' array",
                    name
                )))
            }
        };

        Ok(AvroSchema::Record(RecordSchema {
            name: TypeName::from(name),
            namespace: optional_str(obj, "namespace")?,
            aliases: type_names(obj, "aliases")?,
            doc: optional_str(obj, "doc")?,
            order: parse_order(obj)?,
            fields,
        }))
    }

    /// Parse a field schema within a record.
    fn parse_field_schema(&self, value: &Value) -> Result<FieldSchema> {
        let obj = value
            .as_object()
            .ok_or_else(|| AvroError::InvalidSchema("Field must be an object".to_string()))?;

        let name = required_str(obj, "name", "Field")?;

        let type_value = obj.get("type").ok_or_else(|| {
            AvroError::InvalidSchema(format!("Field '{}' missing 'type'", name))
        })?;
        let schema = self.parse(type_value)?;

        let default = match obj.get("default") {
            Some(json) => Some(parse_default(&Environment::unresolvable(), &schema, json)?),
            None => None,
        };

        Ok(FieldSchema {
            name: name.to_string(),
            aliases: strings(obj, "aliases")?,
            doc: optional_str(obj, "doc")?,
            order: parse_order(obj)?,
            schema,
            default,
        })
    }

    /// Parse an enum schema.
    fn parse_enum_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let name = required_str(obj, "name", "Enum")?;

        if !matches!(obj.get("symbols"), Some(Value::Array(_))) {
            return Err(AvroError::InvalidSchema(format!(
                "Enum '{}' missing 'symbols' array",
                name
            )));
        }
        let symbols = strings(obj, "symbols")?;

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                let msg = format!("Enum '{}' has duplicate symbol '{}'", name, symbol);
                if self.strict_schema {
                    return Err(AvroError::InvalidSchema(msg));
                }
                warn!("{}", msg);
            }
        }

        Ok(AvroSchema::Enum(EnumSchema {
            name: TypeName::from(name),
            namespace: optional_str(obj, "namespace")?,
            aliases: type_names(obj, "aliases")?,
            doc: optional_str(obj, "doc")?,
            symbols,
        }))
    }

    /// Parse an array schema.
    fn parse_array_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let items = obj
            .get("items")
            .ok_or_else(|| AvroError::InvalidSchema("Array missing 'items' field".to_string()))?;

        Ok(AvroSchema::Array(Box::new(self.parse(items)?)))
    }

    /// Parse a map schema.
    fn parse_map_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let values = obj
            .get("values")
            .ok_or_else(|| AvroError::InvalidSchema("Map missing 'values' field".to_string()))?;

        Ok(AvroSchema::Map(Box::new(self.parse(values)?)))
    }

    /// Parse a fixed schema.
    fn parse_fixed_schema(&self, obj: &Map<String, Value>) -> Result<AvroSchema> {
        let name = required_str(obj, "name", "Fixed")?;

        let size = obj.get("size").and_then(Value::as_u64).ok_or_else(|| {
            AvroError::InvalidSchema(format!(
                "Fixed '{}' missing non-negative integer 'size' field",
                name
            ))
        })?;
        let size = usize::try_from(size).map_err(|_| {
            AvroError::InvalidSchema(format!("Fixed '{}' size {} is too large", name, size))
        })?;

        Ok(AvroSchema::Fixed(FixedSchema {
            name: TypeName::from(name),
            namespace: optional_str(obj, "namespace")?,
            aliases: type_names(obj, "aliases")?,
            size,
        }))
    }
}

fn required_str<'a>(obj: &'a Map<String, Value>, key: &str, context: &str) -> Result<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| AvroError::InvalidSchema(format!("{} missing '{}' field", context, key)))
}

fn optional_str(obj: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AvroError::InvalidSchema(format!(
            "'{}' must be a string, found: {}",
            key, other
        ))),
    }
}

/// Read an optional array of strings, defaulting to empty.
fn strings(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>> {
    let Some(value) = obj.get(key) else {
        return Ok(Vec::new());
    };
    let invalid = || AvroError::InvalidSchema(format!("'{}' must be an array of strings", key));

    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|v| v.as_str().map(String::from).ok_or_else(invalid))
        .collect()
}

fn type_names(obj: &Map<String, Value>, key: &str) -> Result<Vec<TypeName>> {
    Ok(strings(obj, key)?.into_iter().map(TypeName::from).collect())
}

fn parse_order(obj: &Map<String, Value>) -> Result<FieldOrder> {
    match obj.get("order") {
        None => Ok(FieldOrder::Ascending),
        Some(Value::String(s)) => FieldOrder::from_keyword(s).ok_or_else(|| {
            AvroError::InvalidSchema(format!(
                "Unknown order '{}' (expected ascending, descending or ignore)",
                s
            ))
        }),
        Some(other) => Err(AvroError::InvalidSchema(format!(
            "'order' must be a string, found: {}",
            other
        ))),
    }
}
