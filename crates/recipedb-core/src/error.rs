use thiserror::Error;

/// Canonical error type for recipe store and query operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bulk payload could not be parsed into recipe records.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Unexpected internal error occurred.
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable details for debugging purposes.
        message: String,
    },

    /// I/O error occurred during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error occurred.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Deserialization error occurred.
    #[error("deserialization error: {0}")]
    DeserializationError(String),

    /// Storage backend error.
    #[error("storage error: {0}")]
    StorageError(String),

    /// Validation error for configuration or input data.
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Creates an `Internal` variant.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a `StorageError` variant.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError(message.into())
    }

    /// Whether the error originates from the storage collaborator.
    ///
    /// Storage-side failures are reported to API callers as service unavailable.
    #[must_use]
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::StorageError(_)
                | Self::IoError(_)
                | Self::SerializationError(_)
                | Self::DeserializationError(_)
        )
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_eof() || err.is_syntax() || err.is_data() {
            Self::DeserializationError(err.to_string())
        } else {
            Self::SerializationError(err.to_string())
        }
    }
}

/// Convenient result alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
