//! JSON serializer.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SerialResult;
use crate::traits::Serializer;

/// Stores any serde value as compact JSON.
///
/// Malformed JSON in the fragment deserializes to `Ok(None)`, never to an
/// error. The default type parameter accepts arbitrary JSON.
pub struct JsonSerializer<T = serde_json::Value> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSerializer<T> {
    /// Create a JSON serializer for `T`.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonSerializer<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonSerializer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializer")
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Serialize + DeserializeOwned> Serializer for JsonSerializer<T> {
    type Value = T;

    fn serialize(&self, value: &T) -> SerialResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize(&self, raw: &str) -> SerialResult<Option<T>> {
        Ok(serde_json::from_str(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Filters {
        test: String,
    }

    const TEST_JSON: &str = r#"{"test":"value"}"#;
    const INVALID_JSON: &str = r#"{"test":"value""#;

    #[test]
    fn serializes_a_value_into_json() {
        let s = JsonSerializer::<Filters>::new();
        let value = Filters {
            test: "value".into(),
        };
        assert_eq!(s.serialize(&value).unwrap(), TEST_JSON);
    }

    #[test]
    fn deserializes_json_into_a_value() {
        let s = JsonSerializer::<Filters>::new();
        assert_eq!(
            s.deserialize(TEST_JSON).unwrap(),
            Some(Filters {
                test: "value".into()
            })
        );
    }

    #[test]
    fn invalid_json_is_none() {
        let s = JsonSerializer::<serde_json::Value>::new();
        assert_eq!(s.deserialize(INVALID_JSON).unwrap(), None);
    }

    #[test]
    fn wrong_shape_is_none() {
        let s = JsonSerializer::<Filters>::new();
        assert_eq!(s.deserialize("[1,2,3]").unwrap(), None);
    }

    #[test]
    fn numbers_are_bare() {
        let s = JsonSerializer::<i64>::new();
        assert_eq!(s.serialize(&0).unwrap(), "0");
        assert_eq!(s.deserialize("2").unwrap(), Some(2));
    }

    #[test]
    fn default_parameter_is_json_value() {
        let s: JsonSerializer = JsonSerializer::default();
        assert_eq!(s.deserialize("[true]").unwrap(), Some(json!([true])));
    }
}
