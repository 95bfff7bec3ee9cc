//! [`HashRepository`]: a [`Repository`] over a URL fragment.

use std::collections::{BTreeMap, BTreeSet};

use fragstate_codec::{build_fragment, parse_fragment, Fragment, FragmentFormat};
use tracing::debug;

use crate::config::RepositoryConfig;
use crate::error::{RepoError, RepoResult};
use crate::patch::Patch;
use crate::port::{AmbientFragment, FragmentPort};
use crate::traits::Repository;

/// Reads and writes state in the query part of a URL fragment.
///
/// Every write re-reads the fragment, merges the patch, and writes the
/// rebuilt string back, so the path and unmanaged keys set by anyone else are
/// preserved. The cycle is not atomic: a concurrent writer of a managed key
/// loses to whichever write lands last.
#[derive(Debug)]
pub struct HashRepository<P: FragmentPort = AmbientFragment> {
    port: P,
    format: FragmentFormat,
    managed: BTreeSet<String>,
}

impl HashRepository<AmbientFragment> {
    /// Create a repository over the process location hash.
    pub fn new<I, K>(managed_keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::with_port(AmbientFragment, managed_keys)
    }
}

impl<P: FragmentPort> HashRepository<P> {
    /// Create a repository over `port` with the default layout.
    pub fn with_port<I, K>(port: P, managed_keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::from_config(port, RepositoryConfig::managing(managed_keys))
    }

    /// Create a repository over `port` from a configuration.
    pub fn from_config(port: P, config: RepositoryConfig) -> Self {
        Self {
            port,
            format: config.format,
            managed: config.managed_keys.into_iter().collect(),
        }
    }

    /// The underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Layout used for writes.
    pub fn format(&self) -> FragmentFormat {
        self.format
    }

    /// Managed keys in sorted order.
    pub fn managed_keys(&self) -> impl Iterator<Item = &str> {
        self.managed.iter().map(String::as_str)
    }

    /// Parse the current fragment.
    pub fn fragment(&self) -> Fragment {
        parse_fragment(&self.port.read_fragment())
    }
}

impl<P: FragmentPort> Repository for HashRepository<P> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.fragment().query.get(key).map(str::to_string))
    }

    fn get_all(&self) -> RepoResult<BTreeMap<String, Option<String>>> {
        let fragment = self.fragment();
        Ok(self
            .managed
            .iter()
            .map(|key| (key.clone(), fragment.query.get(key).map(str::to_string)))
            .collect())
    }

    fn set(&self, patch: &Patch) -> RepoResult<()> {
        if let Some(key) = patch.keys().find(|k| !self.managed.contains(*k)) {
            return Err(RepoError::NonManagedKey {
                key: key.to_string(),
            });
        }
        if patch.is_empty() {
            return Ok(());
        }

        let mut fragment = self.fragment();
        for (key, value) in patch.iter() {
            match value {
                Some(v) => {
                    fragment.query.insert(key, v);
                }
                None => {
                    fragment.query.remove(key);
                }
            }
        }

        let built = build_fragment(&fragment, self.format);
        debug!(keys = patch.len(), fragment = %built, "writing fragment");
        self.port.write_fragment(&built);
        Ok(())
    }

    fn is_managed(&self, key: &str) -> bool {
        self.managed.contains(key)
    }
}
