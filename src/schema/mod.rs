//! Avro schema types and parsing.
//!
//! This module defines the Avro schema type system, its JSON encoding and
//! decoding, named type environments, and schema matching for deconfliction.

mod environment;
mod matching;
mod parser;
mod types;

pub use environment::{Environment, MissingTypeHandler};
pub use matching::schemas_match;
pub use parser::{
    decode_schema, encode_schema, parse_schema, parse_schema_with_options, SchemaParser,
};
pub use types::*;
