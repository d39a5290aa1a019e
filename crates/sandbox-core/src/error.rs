//! Error types for sandbox operations

use std::path::PathBuf;
use thiserror::Error;

use crate::xml::XmlFormatError;

/// Main error type for sandbox operations
#[derive(Debug, Error)]
pub enum SandboxError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML formatting failed (the caller still has the original text)
    #[error("Formatter error: {0}")]
    FormatterError(#[from] XmlFormatError),

    /// Scenario catalog could not be read or built
    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    /// Input rejected before any work was attempted
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Request could not be built or the response body could not be read
    #[error("HTTP error calling {endpoint}: {message}")]
    Http { endpoint: String, message: String },

    /// The request did not complete within the configured timeout
    #[error("Request timeout: {endpoint} did not answer within {seconds}s")]
    Timeout { endpoint: String, seconds: u64 },

    /// The API could not be reached at all
    #[error("Connection failed: could not connect to {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// The API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The transform endpoint answered `success: false`
    #[error("Transformation failed: {message}")]
    TransformFailed { message: String },

    /// JSON/TOML/YAML (de)serialization errors
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Formatter,
    Catalog,
    InvalidInput,
    Network,
    Api,
    Serialization,
    Internal,
}

impl SandboxError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SandboxError::ConfigError { .. } => ErrorKind::Config,
            SandboxError::IoError { .. } => ErrorKind::Io,
            SandboxError::FormatterError(_) => ErrorKind::Formatter,
            SandboxError::CatalogError { .. } => ErrorKind::Catalog,
            SandboxError::InvalidInput { .. } => ErrorKind::InvalidInput,
            SandboxError::Http { .. }
            | SandboxError::Timeout { .. }
            | SandboxError::Connection { .. } => ErrorKind::Network,
            SandboxError::Api { .. } | SandboxError::TransformFailed { .. } => ErrorKind::Api,
            SandboxError::SerializationError { .. } => ErrorKind::Serialization,
            SandboxError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (processing of other inputs can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Formatter | ErrorKind::Catalog | ErrorKind::InvalidInput
        )
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a catalog error
    pub fn catalog_error(message: impl Into<String>) -> Self {
        Self::CatalogError {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for SandboxError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SandboxError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SandboxError::config_error("bad").kind(), ErrorKind::Config);
        assert_eq!(
            SandboxError::Timeout {
                endpoint: "http://localhost:3000/api/generate".to_string(),
                seconds: 30
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(
            SandboxError::TransformFailed {
                message: "no mapping".to_string()
            }
            .kind(),
            ErrorKind::Api
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(SandboxError::invalid_input("empty message").is_recoverable());
        assert!(SandboxError::catalog_error("missing file").is_recoverable());
        assert!(!SandboxError::config_error("bad").is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = SandboxError::Api {
            status: 422,
            message: "Unknown scenario".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 422): Unknown scenario");

        let err = SandboxError::io_error(
            "data/mx_dropdown.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("data/mx_dropdown.json"));
    }
}
