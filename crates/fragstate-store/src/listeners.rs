//! Listener registry and RAII subscriptions.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::store::Store;
use crate::State;

/// A state-change callback.
pub type Listener = Arc<dyn Fn(&State) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
///
/// IDs increase monotonically and are never reused within one store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub usize);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Sparse, append-only listener table. Removal leaves a hole so that later
/// IDs stay valid.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    slots: RwLock<Vec<Option<Listener>>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&self, listener: Listener) -> ListenerId {
        let mut slots = self.slots.write().expect("listener lock poisoned");
        slots.push(Some(listener));
        ListenerId(slots.len() - 1)
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut slots = self.slots.write().expect("listener lock poisoned");
        slots.get_mut(id.0).and_then(Option::take).is_some()
    }

    /// Active listeners in subscription order. The lock is released before
    /// any listener runs, so listeners may subscribe or write state.
    pub(crate) fn snapshot(&self) -> Vec<Listener> {
        let slots = self.slots.read().expect("listener lock poisoned");
        slots.iter().flatten().cloned().collect()
    }

    pub(crate) fn active(&self) -> usize {
        let slots = self.slots.read().expect("listener lock poisoned");
        slots.iter().filter(|s| s.is_some()).count()
    }
}

/// A subscription that ends when dropped.
///
/// This is the lifecycle a UI binding needs: subscribe on mount, unsubscribe
/// on teardown.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<'s> {
    store: &'s Store,
    id: ListenerId,
    active: bool,
}

impl<'s> Subscription<'s> {
    pub(crate) fn new(store: &'s Store, id: ListenerId) -> Self {
        Self {
            store,
            id,
            active: true,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Keep the listener registered past the guard's lifetime.
    pub fn detach(mut self) -> ListenerId {
        self.active = false;
        self.id
    }
}

impl Drop for Subscription<'_> {
    fn drop(&mut self) {
        if self.active {
            self.store.unsubscribe(self.id);
        }
    }
}

impl fmt::Debug for Subscription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener {
        Arc::new(|_: &State| {})
    }

    #[test]
    fn ids_are_sequential() {
        let reg = ListenerRegistry::default();
        assert_eq!(reg.add(noop()), ListenerId(0));
        assert_eq!(reg.add(noop()), ListenerId(1));
    }

    #[test]
    fn removal_is_sparse() {
        let reg = ListenerRegistry::default();
        let a = reg.add(noop());
        reg.add(noop());
        assert!(reg.remove(a));
        assert!(!reg.remove(a));
        assert_eq!(reg.add(noop()), ListenerId(2));
        assert_eq!(reg.active(), 2);
    }

    #[test]
    fn unknown_id_is_not_removed() {
        let reg = ListenerRegistry::default();
        assert!(!reg.remove(ListenerId(7)));
    }

    #[test]
    fn display() {
        assert_eq!(ListenerId(3).to_string(), "listener#3");
    }
}
