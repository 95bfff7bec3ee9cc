//! Typed access to a single state key.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::StoreResult;
use crate::store::Store;
use crate::StatePatch;

/// Typed view of one key, obtained from [`Store::key`].
pub struct KeyHandle<'s, T> {
    store: &'s Store,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<'s, T> KeyHandle<'s, T>
where
    T: Serialize + DeserializeOwned,
{
    pub(crate) fn new(store: &'s Store, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current value, or `None` if absent or not a `T`.
    pub fn get(&self) -> StoreResult<Option<T>> {
        let value = self.store.get_state_key(&self.key)?;
        if value.is_null() {
            return Ok(None);
        }
        match serde_json::from_value(value) {
            Ok(typed) => Ok(Some(typed)),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored value has an unexpected type");
                Ok(None)
            }
        }
    }

    /// Write a value, or delete the key with `None`.
    pub fn set(&self, value: Option<T>) -> StoreResult<()> {
        let json = match value {
            Some(v) => serde_json::to_value(v)?,
            None => Value::Null,
        };
        self.store
            .set_state(StatePatch::from([(self.key.clone(), json)]))
    }
}

impl<T> fmt::Debug for KeyHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("key", &self.key)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
