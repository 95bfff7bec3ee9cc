//! Error types for repository operations.

use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A write targeted a key the repository does not manage.
    #[error("non-managed key cannot be set: {key}")]
    NonManagedKey { key: String },

    /// A dynamic write was not a mapping of keys to strings or nulls.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The repository configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error while reading a configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for repository operations.
pub type RepoResult<T> = std::result::Result<T, RepoError>;
