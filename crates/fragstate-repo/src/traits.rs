//! The [`Repository`] trait defining the storage interface a store writes
//! through.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::RepoResult;
use crate::patch::Patch;

/// Keyed string storage with a managed-key write policy.
///
/// Values are the serialized strings; a repository never interprets them.
pub trait Repository: Send + Sync {
    /// Read one key. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> RepoResult<Option<String>>;

    /// Read every managed key, with `None` for keys that are absent.
    ///
    /// Managed keys are never omitted.
    fn get_all(&self) -> RepoResult<BTreeMap<String, Option<String>>>;

    /// Merge a patch: `Some` overwrites, `None` deletes.
    ///
    /// Existing keys keep their position. Keys new to the storage are
    /// appended in the patch's sorted key order.
    ///
    /// Every key is checked before anything is written; a single
    /// non-managed key fails the whole patch with
    /// [`RepoError::NonManagedKey`](crate::RepoError::NonManagedKey).
    fn set(&self, patch: &Patch) -> RepoResult<()>;

    /// Merge a dynamic JSON object of strings and nulls.
    ///
    /// Fails with [`RepoError::InvalidArgument`](crate::RepoError::InvalidArgument)
    /// if `value` is not such an object.
    fn set_json(&self, value: &Value) -> RepoResult<()> {
        self.set(&Patch::from_json(value)?)
    }

    /// Flush buffered writes.
    ///
    /// Repositories that write through immediately have nothing to flush.
    /// Caching or batching layers override this to publish their pending
    /// state in one write.
    fn commit(&self) -> RepoResult<()> {
        Ok(())
    }

    /// Returns `true` if `key` may be written.
    fn is_managed(&self, key: &str) -> bool;
}
