//! Defines common error types for the Meridian Core library.

use thiserror::Error;

/// The primary error type for Meridian operations.
#[derive(Error, Debug)]
pub enum MeridianError {
    /// Error related to configuration loading or validation.
    #[error("Configuration Error: {0}")]
    ConfigError(String),

    /// Error during file or network I/O operations.
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error during serialization or deserialization (e.g., JSON parsing).
    #[error("Serialization/Deserialization Error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Error indicating a requested resource was not found.
    #[error("Resource Not Found: {0}")]
    NotFound(String),

    /// Error indicating a failure during data validation.
    #[error("Validation Error ({context}): {message}")]
    ValidationError {
        /// Context or field where validation failed.
        context: String,
        /// Specific validation failure message.
        message: String,
    },

    /// The caller is not allowed to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An uploaded payload exceeded the configured size.
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    /// An uploaded payload had a content type we do not accept.
    #[error("Unsupported Media Type: {0}")]
    UnsupportedMediaType(String),

    /// Error reported by the backing database.
    #[error("Storage Error: {0}")]
    StorageError(String),

    /// Represents an unexpected internal error.
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl MeridianError {
    /// Shorthand for building a [`MeridianError::ValidationError`].
    pub fn validation_error(context: &str, message: &str) -> Self {
        MeridianError::ValidationError {
            context: context.to_string(),
            message: message.to_string(),
        }
    }

    /// Shorthand for a [`MeridianError::NotFound`] naming the entity and id.
    pub fn not_found(entity: &str, id: i64) -> Self {
        MeridianError::NotFound(format!("{} {}", entity, id))
    }
}

impl From<sqlx::Error> for MeridianError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => MeridianError::NotFound("row".to_string()),
            other => MeridianError::StorageError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_formats_context() {
        let err = MeridianError::validation_error("product.name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation Error (product.name): must not be empty"
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: MeridianError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, MeridianError::NotFound(_)));
    }
}
