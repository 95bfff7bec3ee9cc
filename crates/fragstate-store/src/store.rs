//! The [`Store`] and its builder.

use std::fmt;
use std::sync::Arc;

use fragstate_repo::{
    FragmentPort, HashRepository, Patch, Repository, RepositoryConfig,
};
use fragstate_serial::KeyCodec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{ActionMap, BoundActions};
use crate::error::{StoreError, StoreResult};
use crate::handle::KeyHandle;
use crate::listeners::{ListenerId, ListenerRegistry, Subscription};
use crate::shape::Shape;
use crate::{State, StatePatch};

/// Observable state container whose storage is a repository, normally the
/// URL fragment.
///
/// The store keeps no copy of the state. Every read deserializes from the
/// repository and every write goes straight to it.
///
/// Listeners run synchronously, in subscription order, after each write. A
/// listener that writes state triggers a nested write and notification;
/// nothing stops a listener that always writes from recursing forever.
pub struct Store {
    shape: Shape,
    repo: Box<dyn Repository>,
    listeners: ListenerRegistry,
}

impl Store {
    /// Create a store over the process location hash, managing the shape's
    /// keys.
    pub fn new(shape: Shape) -> Self {
        let repo = HashRepository::new(shape.keys());
        Self::with_repository(shape, repo)
    }

    /// Create a store over a fragment port, managing the shape's keys.
    pub fn with_port(shape: Shape, port: impl FragmentPort + 'static) -> Self {
        let repo = HashRepository::with_port(port, shape.keys());
        Self::with_repository(shape, repo)
    }

    /// Create a store over an arbitrary repository.
    pub fn with_repository(shape: Shape, repository: impl Repository + 'static) -> Self {
        Self {
            shape,
            repo: Box::new(repository),
            listeners: ListenerRegistry::default(),
        }
    }

    /// Start building a store.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn repository(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    // ---- Reads ----

    /// Every shape key with its current value (`Null` if absent or
    /// undecodable).
    pub fn get_state(&self) -> StoreResult<State> {
        self.shape
            .iter()
            .map(|(key, codec)| Ok((key.to_string(), self.read_key(key, codec)?)))
            .collect()
    }

    /// Current value of `key`. `Null` if absent, undecodable, or not part of
    /// the shape.
    pub fn get_state_key(&self, key: &str) -> StoreResult<Value> {
        match self.shape.get(key) {
            Some(codec) => self.read_key(key, codec),
            None => Ok(Value::Null),
        }
    }

    fn read_key(&self, key: &str, codec: &Arc<dyn KeyCodec>) -> StoreResult<Value> {
        let Some(raw) = self.repo.get(key)? else {
            return Ok(Value::Null);
        };
        match codec.decode(&raw) {
            Ok(value) => Ok(value.unwrap_or(Value::Null)),
            Err(e) => {
                warn!(key, error = %e, "failed to deserialize stored value; treating as absent");
                Ok(Value::Null)
            }
        }
    }

    // ---- Writes ----

    /// Write a partial update and notify listeners.
    ///
    /// An empty patch does nothing and notifies no one. Every key must be in
    /// the shape; this is checked before anything is written. `Null` values
    /// delete the key. A value whose serializer fails is skipped.
    pub fn set_state(&self, patch: StatePatch) -> StoreResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(key) = patch.keys().find(|k| !self.shape.contains(k)) {
            return Err(StoreError::UnknownKey { key: key.clone() });
        }

        let mut serialized = Patch::new();
        for (key, value) in &patch {
            if value.is_null() {
                serialized.insert(key.clone(), None);
                continue;
            }
            let Some(codec) = self.shape.get(key) else {
                continue;
            };
            match codec.encode(value) {
                Ok(raw) => serialized.insert(key.clone(), Some(raw)),
                Err(e) => {
                    warn!(key = %key, error = %e, "failed to serialize value; skipping write");
                }
            }
        }

        self.repo.set(&serialized)?;
        self.repo.commit()?;
        self.notify()
    }

    /// Like [`set_state`](Self::set_state), with `None` as a no-op.
    pub fn set_state_opt(&self, patch: Option<StatePatch>) -> StoreResult<()> {
        match patch {
            Some(patch) => self.set_state(patch),
            None => Ok(()),
        }
    }

    fn notify(&self) -> StoreResult<()> {
        let listeners = self.listeners.snapshot();
        if listeners.is_empty() {
            return Ok(());
        }
        let state = self.get_state()?;
        debug!(listeners = listeners.len(), "notifying listeners");
        for listener in listeners {
            listener(&state);
        }
        Ok(())
    }

    // ---- Subscriptions ----

    /// Register a listener, called with the full state after every write.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    /// Remove a listener. Returns `true` only if it was still registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Register a listener for as long as the returned guard lives.
    pub fn subscription<F>(&self, listener: F) -> Subscription<'_>
    where
        F: Fn(&State) + Send + Sync + 'static,
    {
        Subscription::new(self, self.subscribe(listener))
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.active()
    }

    // ---- Actions and typed access ----

    /// Bind reducers to this store.
    pub fn define_actions(&self, actions: ActionMap) -> BoundActions<'_> {
        BoundActions::new(self, actions)
    }

    /// Typed handle for one key.
    pub fn key<T>(&self, key: &str) -> StoreResult<KeyHandle<'_, T>>
    where
        T: Serialize + DeserializeOwned,
    {
        if !self.shape.contains(key) {
            return Err(StoreError::UnknownKey {
                key: key.to_string(),
            });
        }
        Ok(KeyHandle::new(self, key))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("shape", &self.shape)
            .field("listeners", &self.listeners.active())
            .finish()
    }
}

/// Builder for [`Store`].
#[derive(Default)]
pub struct StoreBuilder {
    shape: Option<Shape>,
    repository: Option<Box<dyn Repository>>,
    config: Option<RepositoryConfig>,
}

impl StoreBuilder {
    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Use `repository` instead of a hash repository.
    pub fn repository(mut self, repository: impl Repository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Configure the default hash repository. The managed keys are always
    /// the shape's keys; only the layout is taken from `config`.
    ///
    /// Ignored when an explicit [`repository`](Self::repository) is given.
    pub fn config(mut self, config: RepositoryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the store. Fails with [`StoreError::ShapeRequired`] if no
    /// shape was given.
    pub fn build(self) -> StoreResult<Store> {
        let shape = self.shape.ok_or(StoreError::ShapeRequired)?;
        let repo = match self.repository {
            Some(repo) => repo,
            None => {
                let config = RepositoryConfig {
                    managed_keys: shape.keys().map(str::to_string).collect(),
                    ..self.config.unwrap_or_default()
                };
                Box::new(HashRepository::from_config(
                    fragstate_repo::AmbientFragment,
                    config,
                ))
            }
        };
        Ok(Store {
            shape,
            repo,
            listeners: ListenerRegistry::default(),
        })
    }
}
