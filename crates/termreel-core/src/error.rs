//! Error types for termreel.

use thiserror::Error;

/// Main error type for termreel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to write a rendered document
    #[error("Failed to write document to {path}: {source}")]
    DocumentWrite {
        /// Destination path of the failed write
        path: String,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = Error::Config("padding must be >= 0".to_string());
        assert_eq!(err.to_string(), "Configuration error: padding must be >= 0");
    }

    #[test]
    fn test_document_write_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::DocumentWrite {
            path: "/tmp/out.svg".to_string(),
            source: io_err,
        };
        let display = err.to_string();
        assert!(display.starts_with("Failed to write document to /tmp/out.svg"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: Result<i32> = Err(Error::Config("test".to_string()));
        assert!(failure.is_err());
    }
}
