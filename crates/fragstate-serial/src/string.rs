//! Identity serializer for plain string values.

use crate::error::SerialResult;
use crate::traits::Serializer;

/// Stores strings as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringSerializer;

impl StringSerializer {
    /// Serialize an optional string, mapping a missing value to `""`.
    pub fn serialize_opt(value: Option<&str>) -> String {
        value.unwrap_or_default().to_string()
    }
}

impl Serializer for StringSerializer {
    type Value = String;

    fn serialize(&self, value: &String) -> SerialResult<String> {
        Ok(Self::serialize_opt(Some(value)))
    }

    fn deserialize(&self, raw: &str) -> SerialResult<Option<String>> {
        Ok(Some(raw.to_string()))
    }
}
