//! The declared set of state keys and their serializers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fragstate_serial::KeyCodec;

/// Mapping from state key to serializer.
///
/// Fixed once a store is built; the keys double as the repository's managed
/// key set.
#[derive(Clone, Default)]
pub struct Shape {
    codecs: BTreeMap<String, Arc<dyn KeyCodec>>,
}

impl Shape {
    /// Create an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, serializer: impl KeyCodec + 'static) -> Self {
        self.insert(key, serializer);
        self
    }

    /// Register `serializer` for `key`, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, serializer: impl KeyCodec + 'static) {
        self.codecs.insert(key.into(), Arc::new(serializer));
    }

    /// Serializer registered for `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn KeyCodec>> {
        self.codecs.get(key)
    }

    /// Returns `true` if `key` is part of the shape.
    pub fn contains(&self, key: &str) -> bool {
        self.codecs.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }

    /// `(key, serializer)` pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn KeyCodec>)> {
        self.codecs.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.codecs.iter().map(|(k, c)| (k, c.value_type())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragstate_serial::{DateSerializer, JsonSerializer, StringSerializer};

    #[test]
    fn keys_are_sorted() {
        let shape = Shape::new()
            .with("zeta", StringSerializer)
            .with("alpha", DateSerializer)
            .with("mid", JsonSerializer::<i64>::new());
        let keys: Vec<&str> = shape.keys().collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn insert_replaces() {
        let mut shape = Shape::new().with("a", StringSerializer);
        shape.insert("a", JsonSerializer::<bool>::new());
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.get("a").unwrap().value_type(), "bool");
    }

    #[test]
    fn debug_lists_value_types() {
        let shape = Shape::new().with("flag", JsonSerializer::<bool>::new());
        assert_eq!(format!("{shape:?}"), r#"{"flag": "bool"}"#);
    }
}
