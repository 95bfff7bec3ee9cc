//! The [`Serializer`] trait and its type-erased form, [`KeyCodec`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::SerialResult;

/// Codec between one typed value and its fragment string.
///
/// Implementations must be deterministic. They are not required to be strict
/// inverses, but `deserialize(serialize(v))` must reproduce anything the
/// serializer itself produced.
pub trait Serializer {
    /// The typed value this serializer handles.
    type Value;

    /// Encode a value for storage in the fragment.
    fn serialize(&self, value: &Self::Value) -> SerialResult<String>;

    /// Decode a stored string.
    ///
    /// Returns `Ok(None)` when the input carries no value.
    fn deserialize(&self, raw: &str) -> SerialResult<Option<Self::Value>>;
}

/// Type-erased serializer over JSON values.
///
/// A store shape holds one `Arc<dyn KeyCodec>` per key. State flows through
/// the store as [`serde_json::Value`] and is converted to and from the typed
/// value at this boundary.
pub trait KeyCodec: Send + Sync {
    /// Convert `value` to the typed value and serialize it.
    fn encode(&self, value: &Value) -> SerialResult<String>;

    /// Deserialize `raw` and convert the typed value to JSON.
    fn decode(&self, raw: &str) -> SerialResult<Option<Value>>;

    /// Name of the underlying value type, for diagnostics.
    fn value_type(&self) -> &'static str;
}

impl<S> KeyCodec for S
where
    S: Serializer + Send + Sync,
    S::Value: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &Value) -> SerialResult<String> {
        let typed: S::Value = serde_json::from_value(value.clone())?;
        self.serialize(&typed)
    }

    fn decode(&self, raw: &str) -> SerialResult<Option<Value>> {
        match self.deserialize(raw)? {
            Some(typed) => Ok(Some(serde_json::to_value(typed)?)),
            None => Ok(None),
        }
    }

    fn value_type(&self) -> &'static str {
        std::any::type_name::<S::Value>()
    }
}
