//! Error types for serializers.

use thiserror::Error;

/// Errors a serializer can report.
///
/// None of these ever reach a store caller: the store logs them and treats
/// the key as holding no value.
#[derive(Debug, Error)]
pub enum SerialError {
    /// The stored string could not be decoded.
    #[error("malformed {kind} value {input:?}: {reason}")]
    Malformed {
        kind: &'static str,
        input: String,
        reason: String,
    },

    /// The value has no string form under this serializer.
    #[error("cannot represent {kind} value: {reason}")]
    Unrepresentable { kind: &'static str, reason: String },

    /// JSON conversion failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for serializer operations.
pub type SerialResult<T> = std::result::Result<T, SerialError>;
