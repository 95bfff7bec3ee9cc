//! A batch of serialized writes.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{RepoError, RepoResult};

/// Keys to write (`Some`) or delete (`None`), applied as one merge.
///
/// Entries are kept sorted by key, so keys new to the fragment are appended
/// in sorted order rather than insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Patch {
    entries: BTreeMap<String, Option<String>>,
}

impl Patch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) with a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Builder form of [`insert`](Self::insert) with a deletion.
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Set `key` to `value`, or mark it for deletion with `None`.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the patch has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a patch from a dynamic JSON value.
    ///
    /// The value must be an object whose members are strings (writes) or
    /// `null` (deletions).
    pub fn from_json(value: &Value) -> RepoResult<Self> {
        let Value::Object(map) = value else {
            return Err(RepoError::InvalidArgument(format!(
                "only objects can be merged into the fragment, got {}",
                json_kind(value)
            )));
        };

        let mut patch = Patch::new();
        for (key, member) in map {
            match member {
                Value::String(s) => patch.insert(key.clone(), Some(s.clone())),
                Value::Null => patch.insert(key.clone(), None),
                other => {
                    return Err(RepoError::InvalidArgument(format!(
                        "value for {key} must be a string or null, got {}",
                        json_kind(other)
                    )))
                }
            }
        }
        Ok(patch)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for Patch {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut patch = Patch::new();
        for (k, v) in iter {
            patch.insert(k, v);
        }
        patch
    }
}
