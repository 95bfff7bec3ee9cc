use fragstate_repo::RepoError;

/// Errors from store operations.
///
/// Serializer failures are not represented here: they are logged and the
/// affected key reads as `Null` or is skipped on write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was built without a shape.
    #[error("a shape for the store must be provided")]
    ShapeRequired,

    /// The key is not part of the store's shape.
    #[error("no serializer registered for key {key}")]
    UnknownKey { key: String },

    /// No action with this name was defined.
    #[error("no action named {name}")]
    UnknownAction { name: String },

    /// A typed value could not be converted to or from JSON.
    #[error("value conversion error: {0}")]
    Value(#[from] serde_json::Error),

    /// The repository rejected the operation.
    #[error("repository error: {0}")]
    Repository(#[from] RepoError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
