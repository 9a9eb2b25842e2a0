//! Parsing of record field defaults.
//!
//! A union-typed default is written in the shape of the union's first branch
//! rather than the tagged form used for live data, so `["null", "string"]`
//! takes the default `null` and `["string", "null"]` takes a bare string.

use serde_json::Value;

use crate::error::Result;
use crate::schema::{AvroSchema, Environment, UnionSchema};
use crate::value::parser::{parse_value, UnionPolicy};
use crate::value::AvroValue;

/// Union policy for field defaults: always the first branch, bare JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstBranchDefaults;

impl UnionPolicy for FirstBranchDefaults {
    fn parse_union(
        &self,
        env: &Environment,
        union: &UnionSchema,
        json: &Value,
    ) -> Result<AvroValue> {
        let first = union.first();
        let value = parse_value(self, env, first, json)?;
        Ok(AvroValue::Union(
            union.clone(),
            Box::new(first.clone()),
            Box::new(value),
        ))
    }
}

/// Parse a field's `default` JSON against the field's schema.
pub fn parse_default(env: &Environment, schema: &AvroSchema, json: &Value) -> Result<AvroValue> {
    parse_value(&FirstBranchDefaults, env, schema, json)
}
