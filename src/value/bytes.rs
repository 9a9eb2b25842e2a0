//! JSON representation of `bytes` and `fixed` values.
//!
//! Avro writes binary data into JSON as a string in which every character
//! stands for one byte: the character's code point is the byte value, so only
//! code points 0-255 may appear.

use crate::error::{AvroError, Result};

/// Decode a JSON byte string into raw bytes.
///
/// # Example
/// ```
/// use avro_model::value::bytes_from_json_string;
///
/// assert_eq!(bytes_from_json_string("\u{0}\u{ff}A").unwrap(), vec![0, 255, 65]);
/// assert!(bytes_from_json_string("\u{100}").is_err());
/// ```
pub fn bytes_from_json_string(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .enumerate()
        .map(|(position, character)| {
            u8::try_from(character).map_err(|_| AvroError::ByteOutOfRange {
                character,
                code: character as u32,
                position,
            })
        })
        .collect()
}

/// Encode raw bytes as a JSON byte string.
pub fn bytes_to_json_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
