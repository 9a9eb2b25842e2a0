//! Avro schema types and representations.
//!
//! This module defines the Avro schema type system (primitives, complex types
//! and named type references) together with its JSON encoding.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde_json::{json, Map, Value};

use crate::error::{AvroError, Result};
use crate::value::AvroValue;

/// A possibly namespace-qualified Avro type name.
///
/// Equality and hashing are by the raw string, so `"Foo"` and `"ns.Foo"` are
/// different names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    /// Create a type name from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append `suffix` to this name.
    pub fn concat(&self, suffix: &str) -> TypeName {
        let mut joined = String::with_capacity(self.0.len() + suffix.len());
        joined.push_str(&self.0);
        joined.push_str(suffix);
        TypeName(joined)
    }

    /// Qualify this name as `"{namespace}.{name}"`.
    pub fn qualified(&self, namespace: &str) -> TypeName {
        TypeName::new(namespace).concat(".").concat(&self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName(name)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TypeName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Represents an Avro schema.
///
/// Equality is intentionally looser than full structural identity: records
/// compare name, namespace and fields; enums compare symbols; unions compare
/// options; fixed types compare size. See the `PartialEq` impls on the
/// individual schema structs.
#[derive(Debug, Clone, PartialEq)]
pub enum AvroSchema {
    // Primitive types
    /// Null type - no value.
    Null,
    /// Boolean type.
    Boolean,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit IEEE 754 floating-point.
    Float,
    /// 64-bit IEEE 754 floating-point.
    Double,
    /// Sequence of bytes.
    Bytes,
    /// Unicode string.
    String,

    // Complex types
    /// Array of items with a single schema.
    Array(Box<AvroSchema>),
    /// Map with string keys and values of a single schema.
    Map(Box<AvroSchema>),
    /// Record type with named fields.
    Record(RecordSchema),
    /// Enumeration type.
    Enum(EnumSchema),
    /// Union of multiple schemas.
    Union(UnionSchema),
    /// Fixed-size byte array.
    Fixed(FixedSchema),

    /// Unresolved reference to a named type, looked up through an
    /// [`Environment`](crate::schema::Environment) when values are parsed.
    Named(TypeName),
}

/// Field ordering for record comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldOrder {
    #[default]
    Ascending,
    Descending,
    Ignore,
}

impl FieldOrder {
    /// The schema JSON keyword for this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldOrder::Ascending => "ascending",
            FieldOrder::Descending => "descending",
            FieldOrder::Ignore => "ignore",
        }
    }

    /// Parse a schema JSON order keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ascending" => Some(FieldOrder::Ascending),
            "descending" => Some(FieldOrder::Descending),
            "ignore" => Some(FieldOrder::Ignore),
            _ => None,
        }
    }
}

/// Schema for a record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    /// The name of the record.
    pub name: TypeName,
    /// Optional namespace for the record.
    pub namespace: Option<String>,
    /// Aliases for this record.
    pub aliases: Vec<TypeName>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Sort order of the record as a whole.
    pub order: FieldOrder,
    /// The fields of the record, in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.namespace == other.namespace && self.fields == other.fields
    }
}

impl RecordSchema {
    /// Create a new RecordSchema with the given name and fields.
    pub fn new(name: impl Into<TypeName>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            aliases: Vec::new(),
            doc: None,
            order: FieldOrder::Ascending,
            fields,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<TypeName>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> TypeName {
        qualify(&self.name, self.namespace.as_deref())
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Serialize the record schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("record"));
        obj.insert("name".to_string(), json!(self.name.as_str()));

        if let Some(ns) = &self.namespace {
            obj.insert("namespace".to_string(), json!(ns));
        }

        if let Some(doc) = &self.doc {
            obj.insert("doc".to_string(), json!(doc));
        }

        if !self.aliases.is_empty() {
            obj.insert("aliases".to_string(), names_to_json(&self.aliases));
        }

        if self.order != FieldOrder::Ascending {
            obj.insert("order".to_string(), json!(self.order.as_str()));
        }

        let fields: Vec<Value> = self.fields.iter().map(|f| f.to_json_value()).collect();
        obj.insert("fields".to_string(), Value::Array(fields));

        Value::Object(obj)
    }
}

/// Schema for a field within a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// The name of the field.
    pub name: String,
    /// Aliases for this field.
    pub aliases: Vec<String>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// Field ordering (ascending, descending, ignore).
    pub order: FieldOrder,
    /// The schema of the field's value.
    pub schema: AvroSchema,
    /// Default value, already parsed against `schema`.
    pub default: Option<AvroValue>,
}

impl FieldSchema {
    /// Create a new FieldSchema with the given name and schema.
    pub fn new(name: impl Into<String>, schema: AvroSchema) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            doc: None,
            order: FieldOrder::Ascending,
            schema,
            default: None,
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: AvroValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the sort order.
    pub fn with_order(mut self, order: FieldOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Serialize the field schema to a JSON Value.
    ///
    /// Defaults are written in the default-value convention, so a union
    /// default appears in the shape of the union's first branch.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(&self.name));
        obj.insert("type".to_string(), self.schema.to_json_value());

        if let Some(default) = &self.default {
            obj.insert("default".to_string(), default.to_default_json_value());
        }

        if let Some(doc) = &self.doc {
            obj.insert("doc".to_string(), json!(doc));
        }

        if self.order != FieldOrder::Ascending {
            obj.insert("order".to_string(), json!(self.order.as_str()));
        }

        if !self.aliases.is_empty() {
            obj.insert("aliases".to_string(), json!(&self.aliases));
        }

        Value::Object(obj)
    }
}

/// Schema for an enumeration type.
///
/// The position of a symbol in `symbols` is its index.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    /// The name of the enum.
    pub name: TypeName,
    /// Optional namespace for the enum.
    pub namespace: Option<String>,
    /// Aliases for this enum.
    pub aliases: Vec<TypeName>,
    /// Optional documentation.
    pub doc: Option<String>,
    /// The symbols (variants) of the enum.
    pub symbols: Vec<String>,
}

impl PartialEq for EnumSchema {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl EnumSchema {
    /// Create a new EnumSchema with the given name and symbols.
    ///
    /// Symbols are expected to be unique; this is not checked here.
    pub fn new(name: impl Into<TypeName>, symbols: Vec<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            aliases: Vec::new(),
            doc: None,
            symbols,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<TypeName>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> TypeName {
        qualify(&self.name, self.namespace.as_deref())
    }

    /// Get the symbol at `index`.
    pub fn symbol_at(&self, index: usize) -> Option<&str> {
        self.symbols.get(index).map(String::as_str)
    }

    /// Get the index of a symbol.
    pub fn symbol_index(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Serialize the enum schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("enum"));
        obj.insert("name".to_string(), json!(self.name.as_str()));

        if let Some(ns) = &self.namespace {
            obj.insert("namespace".to_string(), json!(ns));
        }

        if let Some(doc) = &self.doc {
            obj.insert("doc".to_string(), json!(doc));
        }

        if !self.aliases.is_empty() {
            obj.insert("aliases".to_string(), names_to_json(&self.aliases));
        }

        obj.insert("symbols".to_string(), json!(&self.symbols));

        Value::Object(obj)
    }
}

/// Schema for a union: a non-empty, ordered list of alternative schemas.
///
/// A union's options should not themselves be unions, and no two options
/// should share a branch kind (primitive kind, `array`, `map`, or named-type
/// name). Construction does not enforce this; see [`UnionSchema::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    options: Vec<AvroSchema>,
}

impl UnionSchema {
    /// Create a union from its options, in order.
    pub fn new(options: Vec<AvroSchema>) -> Result<Self> {
        if options.is_empty() {
            return Err(AvroError::InvalidUnion(
                "Union schema cannot be empty".to_string(),
            ));
        }
        Ok(Self { options })
    }

    /// All options, in declaration order.
    pub fn options(&self) -> &[AvroSchema] {
        &self.options
    }

    /// The option at `index`.
    pub fn option_at(&self, index: usize) -> Option<&AvroSchema> {
        self.options.get(index)
    }

    /// The first option; unions are never empty.
    pub fn first(&self) -> &AvroSchema {
        &self.options[0]
    }

    /// Find the option whose type name or fully qualified name is `name`.
    pub fn branch_named(&self, name: &str) -> Option<(usize, &AvroSchema)> {
        self.options.iter().enumerate().find(|(_, option)| {
            option.type_name() == name || option.fullname().is_some_and(|full| full == name)
        })
    }

    /// Check the union rules: no nested unions and no duplicate branch kinds.
    pub fn validate(&self) -> Result<()> {
        for (i, option) in self.options.iter().enumerate() {
            if matches!(option, AvroSchema::Union(_)) {
                return Err(AvroError::InvalidUnion(format!(
                    "Union contains nested union at position {} (unions cannot be nested)",
                    i
                )));
            }
        }

        let mut seen = HashSet::new();
        for (i, option) in self.options.iter().enumerate() {
            let key = option.fullname().unwrap_or_else(|| option.type_name());
            if !seen.insert(key.clone()) {
                return Err(AvroError::InvalidUnion(format!(
                    "Union contains duplicate type '{}' at position {}",
                    key, i
                )));
            }
        }

        Ok(())
    }

    /// Serialize the union to a JSON array of its options.
    pub fn to_json_value(&self) -> Value {
        Value::Array(self.options.iter().map(|o| o.to_json_value()).collect())
    }
}

/// Schema for a fixed-size byte array.
#[derive(Debug, Clone)]
pub struct FixedSchema {
    /// The name of the fixed type.
    pub name: TypeName,
    /// Optional namespace for the fixed type.
    pub namespace: Option<String>,
    /// Aliases for this fixed type.
    pub aliases: Vec<TypeName>,
    /// The size in bytes.
    pub size: usize,
}

impl PartialEq for FixedSchema {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
    }
}

impl FixedSchema {
    /// Create a new FixedSchema with the given name and size.
    pub fn new(name: impl Into<TypeName>, size: usize) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            aliases: Vec::new(),
            size,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: Vec<TypeName>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Get the fully qualified name.
    pub fn fullname(&self) -> TypeName {
        qualify(&self.name, self.namespace.as_deref())
    }

    /// Serialize the fixed schema to a JSON Value.
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), json!("fixed"));
        obj.insert("name".to_string(), json!(self.name.as_str()));

        if let Some(ns) = &self.namespace {
            obj.insert("namespace".to_string(), json!(ns));
        }

        if !self.aliases.is_empty() {
            obj.insert("aliases".to_string(), names_to_json(&self.aliases));
        }

        obj.insert("size".to_string(), json!(self.size));

        Value::Object(obj)
    }
}

impl AvroSchema {
    /// Build a union schema from its options.
    pub fn union(options: Vec<AvroSchema>) -> Result<Self> {
        UnionSchema::new(options).map(AvroSchema::Union)
    }

    /// Build a named type reference.
    pub fn named(name: impl Into<TypeName>) -> Self {
        AvroSchema::Named(name.into())
    }

    /// Check if this schema is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            AvroSchema::Null
                | AvroSchema::Boolean
                | AvroSchema::Int
                | AvroSchema::Long
                | AvroSchema::Float
                | AvroSchema::Double
                | AvroSchema::Bytes
                | AvroSchema::String
        )
    }

    /// Check if this schema is a named type (record, enum, or fixed).
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            AvroSchema::Record(_) | AvroSchema::Enum(_) | AvroSchema::Fixed(_)
        )
    }

    /// Get the declared name of a named type or reference, if applicable.
    pub fn name(&self) -> Option<&TypeName> {
        match self {
            AvroSchema::Record(r) => Some(&r.name),
            AvroSchema::Enum(e) => Some(&e.name),
            AvroSchema::Fixed(f) => Some(&f.name),
            AvroSchema::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Get the fully qualified name of a named type or reference, if applicable.
    pub fn fullname(&self) -> Option<TypeName> {
        match self {
            AvroSchema::Record(r) => Some(r.fullname()),
            AvroSchema::Enum(e) => Some(e.fullname()),
            AvroSchema::Fixed(f) => Some(f.fullname()),
            AvroSchema::Named(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// The name used to tag union branches and to match named references.
    ///
    /// Primitives, arrays and maps use their keyword; named types and
    /// references use their declared name; a union uses its first option.
    pub fn type_name(&self) -> TypeName {
        match self {
            AvroSchema::Null => TypeName::from("null"),
            AvroSchema::Boolean => TypeName::from("boolean"),
            AvroSchema::Int => TypeName::from("int"),
            AvroSchema::Long => TypeName::from("long"),
            AvroSchema::Float => TypeName::from("float"),
            AvroSchema::Double => TypeName::from("double"),
            AvroSchema::Bytes => TypeName::from("bytes"),
            AvroSchema::String => TypeName::from("string"),
            AvroSchema::Array(_) => TypeName::from("array"),
            AvroSchema::Map(_) => TypeName::from("map"),
            AvroSchema::Union(u) => u.first().type_name(),
            AvroSchema::Record(r) => r.name.clone(),
            AvroSchema::Enum(e) => e.name.clone(),
            AvroSchema::Fixed(f) => f.name.clone(),
            AvroSchema::Named(n) => n.clone(),
        }
    }

    /// Check if this schema represents a nullable type (union with null).
    pub fn is_nullable(&self) -> bool {
        match self {
            AvroSchema::Union(u) => u.options().iter().any(|v| matches!(v, AvroSchema::Null)),
            _ => false,
        }
    }

    /// Short description used in mismatch messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            AvroSchema::Record(r) => format!("record '{}'", r.name),
            AvroSchema::Enum(e) => format!("enum '{}'", e.name),
            AvroSchema::Fixed(f) => format!("fixed '{}'", f.name),
            AvroSchema::Named(n) => format!("named type '{}'", n),
            AvroSchema::Union(_) => "union".to_string(),
            other => other.type_name().to_string(),
        }
    }

    /// Serialize the schema to a JSON string.
    ///
    /// # Example
    /// ```
    /// use avro_model::schema::AvroSchema;
    ///
    /// let schema = AvroSchema::String;
    /// assert_eq!(schema.to_json(), r#""string""#);
    /// ```
    pub fn to_json(&self) -> String {
        self.to_json_value().to_string()
    }

    /// Serialize the schema to a JSON Value.
    ///
    /// This is useful when you need to embed the schema in a larger JSON structure.
    pub fn to_json_value(&self) -> Value {
        match self {
            // Primitive types serialize as simple strings
            AvroSchema::Null => json!("null"),
            AvroSchema::Boolean => json!("boolean"),
            AvroSchema::Int => json!("int"),
            AvroSchema::Long => json!("long"),
            AvroSchema::Float => json!("float"),
            AvroSchema::Double => json!("double"),
            AvroSchema::Bytes => json!("bytes"),
            AvroSchema::String => json!("string"),

            AvroSchema::Array(items) => {
                json!({
                    "type": "array",
                    "items": items.to_json_value()
                })
            }
            AvroSchema::Map(values) => {
                json!({
                    "type": "map",
                    "values": values.to_json_value()
                })
            }
            AvroSchema::Record(r) => r.to_json_value(),
            AvroSchema::Enum(e) => e.to_json_value(),
            AvroSchema::Union(u) => u.to_json_value(),
            AvroSchema::Fixed(f) => f.to_json_value(),

            // Named type reference - just the name string
            AvroSchema::Named(name) => json!(name.as_str()),
        }
    }
}

fn qualify(name: &TypeName, namespace: Option<&str>) -> TypeName {
    match namespace {
        Some(ns) => name.qualified(ns),
        None => name.clone(),
    }
}

fn names_to_json(names: &[TypeName]) -> Value {
    Value::Array(names.iter().map(|n| json!(n.as_str())).collect())
}
