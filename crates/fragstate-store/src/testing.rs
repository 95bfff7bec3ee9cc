//! Stores backed by an in-memory repository, for tests of code that uses a
//! store.

use fragstate_repo::InMemoryRepository;

use crate::shape::Shape;
use crate::store::Store;

/// A store over an empty [`InMemoryRepository`] that accepts every key.
pub fn in_memory_store(shape: Shape) -> Store {
    Store::with_repository(shape, InMemoryRepository::new())
}

/// A store over an [`InMemoryRepository`] seeded with serialized values.
pub fn seeded_store<I, K, V>(shape: Shape, values: I) -> Store
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let repo = values
        .into_iter()
        .fold(InMemoryRepository::new(), |repo, (k, v)| repo.seeded(k, v));
    Store::with_repository(shape, repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragstate_serial::StringSerializer;
    use serde_json::json;

    #[test]
    fn in_memory_store_starts_empty() {
        let store = in_memory_store(Shape::new().with("a", StringSerializer));
        assert_eq!(store.get_state().unwrap()["a"], serde_json::Value::Null);
    }

    #[test]
    fn seeded_store_reads_values() {
        let store = seeded_store(Shape::new().with("a", StringSerializer), [("a", "x")]);
        assert_eq!(store.get_state_key("a").unwrap(), json!("x"));
    }
}
