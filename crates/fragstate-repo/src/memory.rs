//! In-memory repository for testing and embedding.
//!
//! [`InMemoryRepository`] keeps serialized values in a `BTreeMap` behind a
//! `RwLock` and never touches a fragment. It honours the same
//! [`Repository`] contract as [`HashRepository`](crate::HashRepository),
//! which makes it a drop-in double for store tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::error::{RepoError, RepoResult};
use crate::patch::Patch;
use crate::traits::Repository;

/// An in-memory implementation of [`Repository`].
///
/// Created with [`new`](Self::new) it accepts any key. Created with
/// [`with_managed_keys`](Self::with_managed_keys) it enforces a managed set
/// exactly like the hash repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    values: RwLock<BTreeMap<String, String>>,
    managed: Option<BTreeSet<String>>,
    commits: AtomicUsize,
}

impl InMemoryRepository {
    /// Create an empty repository that accepts every key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository restricted to `keys`.
    pub fn with_managed_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            managed: Some(keys.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Builder: seed an initial value, bypassing the managed-key check.
    pub fn seeded(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .write()
            .expect("lock poisoned")
            .insert(key.into(), value.into());
        self
    }

    /// Clear every stored value.
    pub fn reset(&self) {
        self.values.write().expect("lock poisoned").clear();
        self.commits.store(0, Ordering::SeqCst);
    }

    /// Snapshot of every stored value.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.read().expect("lock poisoned").clone()
    }

    /// Number of times [`Repository::commit`] was called.
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl Repository for InMemoryRepository {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let values = self.values.read().expect("lock poisoned");
        Ok(values.get(key).cloned())
    }

    fn get_all(&self) -> RepoResult<BTreeMap<String, Option<String>>> {
        let values = self.values.read().expect("lock poisoned");
        Ok(match &self.managed {
            Some(managed) => managed
                .iter()
                .map(|k| (k.clone(), values.get(k).cloned()))
                .collect(),
            None => values
                .iter()
                .map(|(k, v)| (k.clone(), Some(v.clone())))
                .collect(),
        })
    }

    fn set(&self, patch: &Patch) -> RepoResult<()> {
        if let Some(key) = patch.keys().find(|k| !self.is_managed(k)) {
            return Err(RepoError::NonManagedKey {
                key: key.to_string(),
            });
        }

        let mut values = self.values.write().expect("lock poisoned");
        for (key, value) in patch.iter() {
            match value {
                Some(v) => {
                    values.insert(key.to_string(), v.to_string());
                }
                None => {
                    values.remove(key);
                }
            }
        }
        Ok(())
    }

    fn commit(&self) -> RepoResult<()> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_managed(&self, key: &str) -> bool {
        self.managed.as_ref().map_or(true, |m| m.contains(key))
    }
}
