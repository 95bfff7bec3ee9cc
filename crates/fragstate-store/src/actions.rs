//! Named reducers bound to a store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use crate::{State, StatePatch};

/// A pure reducer: current state and a payload in, partial update out.
pub type Reducer = Arc<dyn Fn(&State, &Value) -> StatePatch + Send + Sync>;

/// Action name to reducer. [`ActionMap::default`] is empty.
#[derive(Clone, Default)]
pub struct ActionMap {
    reducers: BTreeMap<String, Reducer>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<F>(mut self, name: impl Into<String>, reducer: F) -> Self
    where
        F: Fn(&State, &Value) -> StatePatch + Send + Sync + 'static,
    {
        self.insert(name, reducer);
        self
    }

    pub fn insert<F>(&mut self, name: impl Into<String>, reducer: F)
    where
        F: Fn(&State, &Value) -> StatePatch + Send + Sync + 'static,
    {
        self.reducers.insert(name.into(), Arc::new(reducer));
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl fmt::Debug for ActionMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.reducers.keys()).finish()
    }
}

/// Reducers bound to a store, returned by [`Store::define_actions`].
pub struct BoundActions<'s> {
    store: &'s Store,
    reducers: BTreeMap<String, Reducer>,
}

impl<'s> BoundActions<'s> {
    pub(crate) fn new(store: &'s Store, actions: ActionMap) -> Self {
        Self {
            store,
            reducers: actions.reducers,
        }
    }

    /// Run the named action: read state, apply the reducer, write the result.
    pub fn dispatch(&self, name: &str, payload: Value) -> StoreResult<()> {
        self.get(name)
            .ok_or_else(|| StoreError::UnknownAction {
                name: name.to_string(),
            })?
            .call(payload)
    }

    /// The named action as a callable.
    pub fn get(&self, name: &str) -> Option<BoundAction<'_>> {
        self.reducers.get_key_value(name).map(|(name, reducer)| BoundAction {
            store: self.store,
            name,
            reducer,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reducers.contains_key(name)
    }

    /// Action names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.reducers.keys().map(String::as_str)
    }
}

impl fmt::Debug for BoundActions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.reducers.keys()).finish()
    }
}

/// One bound action.
pub struct BoundAction<'a> {
    store: &'a Store,
    name: &'a str,
    reducer: &'a Reducer,
}

impl BoundAction<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn call(&self, payload: Value) -> StoreResult<()> {
        let state = self.store.get_state()?;
        let patch = (self.reducer)(&state, &payload);
        debug!(action = self.name, keys = patch.len(), "dispatching action");
        self.store.set_state(patch)
    }
}
