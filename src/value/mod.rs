//! Typed Avro values and the Avro JSON value encoding.

mod bytes;
mod default;
mod parser;
mod types;

pub use bytes::{bytes_from_json_string, bytes_to_json_string};
pub use default::{parse_default, FirstBranchDefaults};
pub use parser::{decode_value, json_to_avro_value, parse_value, TaggedUnions, UnionPolicy};
pub use types::{encode_value, AvroValue};
