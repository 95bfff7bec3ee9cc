//! Raw fragment I/O.
//!
//! A [`FragmentPort`] is the only place a repository touches the outside
//! world. Keeping it behind a trait lets the repository run against a real
//! host location, a shared in-memory string, or anything else that can hold
//! a fragment.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Read/write access to a fragment string (including its leading `#`).
pub trait FragmentPort: Send + Sync {
    /// Current fragment. May be empty.
    fn read_fragment(&self) -> String;

    /// Replace the fragment.
    fn write_fragment(&self, fragment: &str);
}

/// Process-wide location hash.
static LOCATION_HASH: RwLock<String> = RwLock::new(String::new());

/// The host's location hash, shared by every handle in the process.
///
/// This is the default port. Hosts that own a real URL (a webview, a
/// browser binding) mirror it by calling [`AmbientFragment::navigate`] when
/// the URL changes and reading [`AmbientFragment::current`] after writes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbientFragment;

impl AmbientFragment {
    /// Current value of the location hash.
    pub fn current() -> String {
        LOCATION_HASH.read().expect("location lock poisoned").clone()
    }

    /// Replace the location hash, as a navigation would.
    pub fn navigate(fragment: &str) {
        *LOCATION_HASH.write().expect("location lock poisoned") = fragment.to_string();
    }
}

impl FragmentPort for AmbientFragment {
    fn read_fragment(&self) -> String {
        Self::current()
    }

    fn write_fragment(&self, fragment: &str) {
        Self::navigate(fragment);
    }
}

/// A fragment held in memory. Clones share the same string.
#[derive(Clone, Debug, Default)]
pub struct MemoryFragment {
    fragment: Arc<RwLock<String>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryFragment {
    /// Create a port holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            fragment: Arc::new(RwLock::new(initial.into())),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current fragment.
    pub fn get(&self) -> String {
        self.fragment.read().expect("fragment lock poisoned").clone()
    }

    /// Replace the fragment from outside the repository, as a user editing
    /// the URL would. Not counted in [`writes`](Self::writes).
    pub fn navigate(&self, fragment: impl Into<String>) {
        *self.fragment.write().expect("fragment lock poisoned") = fragment.into();
    }

    /// Number of writes made through [`FragmentPort::write_fragment`].
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl FragmentPort for MemoryFragment {
    fn read_fragment(&self) -> String {
        self.get()
    }

    fn write_fragment(&self, fragment: &str) {
        *self.fragment.write().expect("fragment lock poisoned") = fragment.to_string();
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fragment_clones_share_state() {
        let port = MemoryFragment::new("#a");
        let other = port.clone();
        other.write_fragment("#b");
        assert_eq!(port.read_fragment(), "#b");
        assert_eq!(port.writes(), 1);
    }

    #[test]
    fn navigation_is_not_a_write() {
        let port = MemoryFragment::default();
        port.navigate("#?x=1");
        assert_eq!(port.get(), "#?x=1");
        assert_eq!(port.writes(), 0);
    }

    #[test]
    fn ambient_fragment_is_process_wide() {
        let a = AmbientFragment;
        let b = AmbientFragment;
        a.write_fragment("#ambient-port-test");
        assert_eq!(b.read_fragment(), "#ambient-port-test");
        assert_eq!(AmbientFragment::current(), "#ambient-port-test");
    }
}
