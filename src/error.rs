//! Error types for Avro schema and value handling

use thiserror::Error;

use crate::schema::TypeName;

/// Errors produced while decoding schemas, resolving named types, or converting
/// JSON values against a schema.
///
/// Every variant renders a human-readable message; callers that only need the
/// message can rely on `Display`.
#[derive(Debug, Error)]
pub enum AvroError {
    /// Schema JSON has the wrong shape or is missing a required key
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Schema object names a `"type"` that is not an Avro type keyword
    #[error("Unknown type: '{0}'")]
    UnknownType(String),

    /// Union is empty or, in strict mode, violates the union rules
    #[error("Invalid union: {0}")]
    InvalidUnion(String),

    /// Named type reference absent from the environment
    #[error("Unresolved named type reference: '{0}'")]
    UnresolvedType(TypeName),

    /// Default declared for a field whose type needs a named-type lookup
    #[error(
        "Default values are not supported for aliased or recursive types at this time \
         (found reference to '{0}')"
    )]
    UnsupportedDefault(TypeName),

    /// JSON shape incompatible with the expected schema
    #[error("Type mismatch: expected {expected}, found JSON {found}")]
    TypeMismatch { expected: String, found: String },

    /// JSON string is not one of the enum's symbols
    #[error("Unknown enum symbol '{symbol}' for enum '{enum_name}'")]
    UnknownEnumSymbol { symbol: String, enum_name: String },

    /// Decoded byte length differs from the fixed size
    #[error("Fixed '{name}' has wrong size: expected {expected} bytes, got {actual}")]
    FixedSizeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Byte string contains a character outside the 0-255 range
    #[error("Byte string contains character {character:?} (U+{code:04X}) at position {position}, outside 0-255")]
    ByteOutOfRange {
        character: char,
        code: u32,
        position: usize,
    },

    /// Record JSON omits a field that has no default
    #[error("no record field '{0}' and no default in schema")]
    MissingField(String),

    /// JSON number does not fit the target integer type
    #[error("Value {value} out of range for {target}")]
    NumberOutOfRange { value: String, target: &'static str },

    /// Tagged union key does not name any branch
    #[error("No union branch named '{0}'")]
    UnknownUnionBranch(String),

    /// Input is not well-formed JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AvroError {
    /// Failure handler used by environments built with [`crate::Environment::build`].
    pub fn unresolved(name: &TypeName) -> Self {
        AvroError::UnresolvedType(name.clone())
    }

    /// Failure handler used when parsing field defaults inside a schema document.
    pub fn unsupported_default(name: &TypeName) -> Self {
        AvroError::UnsupportedDefault(name.clone())
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        AvroError::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T, E = AvroError> = std::result::Result<T, E>;

/// Left-biased choice over fallible alternatives.
///
/// Attempts run in order; the first success is returned without running the
/// rest. If every attempt fails the last failure is returned. An empty list of
/// attempts is an [`AvroError::InvalidSchema`] since there is nothing to choose.
///
/// # Example
/// ```
/// use avro_model::error::{first_success, AvroError, Result};
///
/// let attempts: Vec<Box<dyn FnOnce() -> Result<i32>>> = vec![
///     Box::new(|| Err(AvroError::MissingField("a".to_string()))),
///     Box::new(|| Ok(7)),
/// ];
/// assert_eq!(first_success(attempts).unwrap(), 7);
/// ```
pub fn first_success<T, F>(attempts: impl IntoIterator<Item = F>) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let mut last = None;
    for attempt in attempts {
        match attempt() {
            Ok(value) => return Ok(value),
            Err(err) => last = Some(err),
        }
    }
    Err(last.unwrap_or_else(|| AvroError::InvalidSchema("no alternatives to try".to_string())))
}
