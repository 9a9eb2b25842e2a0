//! Schema matching for deconfliction.
//!
//! [`schemas_match`] decides whether a writer schema and a reader schema line
//! up closely enough to translate values between them. It is looser than
//! schema equality: named references match any schema carrying that name, and
//! record fields are paired by position and compared by type only.

use crate::schema::{AvroSchema, RecordSchema, UnionSchema};

/// Check whether two schemas match for deconfliction.
///
/// # Rules
/// - A named reference on either side matches a schema whose
///   [`type_name`](AvroSchema::type_name) is the referenced name
/// - Arrays match when their item schemas match
/// - Records match when name, namespace and field count agree and fields
///   match pairwise in declaration order (field names are not compared)
/// - Unions match when they have the same number of options and options
///   match pairwise in order
/// - Everything else falls back to schema equality
///
/// # Example
/// ```
/// use avro_model::schema::{schemas_match, AvroSchema, RecordSchema};
///
/// let record = AvroSchema::Record(RecordSchema::new("X", vec![]));
/// assert!(schemas_match(&AvroSchema::named("X"), &record));
/// assert!(!schemas_match(&AvroSchema::named("Y"), &record));
/// ```
pub fn schemas_match(a: &AvroSchema, b: &AvroSchema) -> bool {
    match (a, b) {
        (AvroSchema::Named(name), other) | (other, AvroSchema::Named(name)) => {
            other.type_name() == *name
        }
        (AvroSchema::Array(a_items), AvroSchema::Array(b_items)) => {
            schemas_match(a_items, b_items)
        }
        (AvroSchema::Record(a_record), AvroSchema::Record(b_record)) => {
            records_match(a_record, b_record)
        }
        (AvroSchema::Union(a_union), AvroSchema::Union(b_union)) => unions_match(a_union, b_union),
        _ => a == b,
    }
}

fn records_match(a: &RecordSchema, b: &RecordSchema) -> bool {
    a.name == b.name
        && a.namespace == b.namespace
        && a.fields.len() == b.fields.len()
        && a
            .fields
            .iter()
            .zip(&b.fields)
            .all(|(fa, fb)| schemas_match(&fa.schema, &fb.schema))
}

fn unions_match(a: &UnionSchema, b: &UnionSchema) -> bool {
    a.options().len() == b.options().len()
        && a
            .options()
            .iter()
            .zip(b.options())
            .all(|(oa, ob)| schemas_match(oa, ob))
}
