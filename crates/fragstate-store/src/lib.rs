//! Observable state store persisted in the URL fragment.
//!
//! A [`Store`] is declared with a [`Shape`]: one serializer per state key.
//! The fragment, not memory, is the source of truth. Reads go through the
//! repository and the key's serializer; writes serialize each value, merge
//! them into the fragment as one batch, and then notify every subscriber
//! with the fresh state.
//!
//! ```
//! use fragstate_repo::MemoryFragment;
//! use fragstate_serial::JsonSerializer;
//! use fragstate_store::{ActionMap, Shape, StatePatch, Store};
//! use serde_json::json;
//!
//! let port = MemoryFragment::default();
//! let shape = Shape::new().with("count", JsonSerializer::<i64>::new());
//! let store = Store::with_port(shape, port.clone());
//!
//! store.set_state(StatePatch::from([("count".to_string(), json!(0))])).unwrap();
//! assert_eq!(port.get(), "#?count=0");
//!
//! let actions = store.define_actions(ActionMap::new().with("increment", |state, _| {
//!     let n = state["count"].as_i64().unwrap_or(0);
//!     StatePatch::from([("count".to_string(), json!(n + 1))])
//! }));
//! actions.dispatch("increment", json!(null)).unwrap();
//! assert_eq!(port.get(), "#?count=1");
//! ```
//!
//! # Modules
//!
//! - [`error`] — [`StoreError`]
//! - [`shape`] — [`Shape`]
//! - [`store`] — [`Store`], [`StoreBuilder`]
//! - [`listeners`] — [`ListenerId`], [`Subscription`]
//! - [`actions`] — [`ActionMap`], [`BoundActions`]
//! - [`handle`] — [`KeyHandle`], typed access to one key
//! - [`testing`] — stores backed by an in-memory repository

pub mod actions;
pub mod error;
pub mod handle;
pub mod listeners;
pub mod shape;
pub mod store;
pub mod testing;

use std::collections::BTreeMap;

use serde_json::Value;

pub use actions::{ActionMap, BoundAction, BoundActions, Reducer};
pub use error::{StoreError, StoreResult};
pub use handle::KeyHandle;
pub use listeners::{Listener, ListenerId, Subscription};
pub use shape::Shape;
pub use store::{Store, StoreBuilder};

/// Full deserialized state: every shape key, `Null` when it has no value.
pub type State = BTreeMap<String, Value>;

/// A partial update. `Null` deletes the key from the fragment.
///
/// Keys not yet in the fragment are appended in sorted order.
pub type StatePatch = BTreeMap<String, Value>;
