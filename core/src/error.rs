use thiserror::Error;

/// corex error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// HTTP transport failure or non-success status
    #[error("Network error: {url} - {message}")]
    Network { url: String, message: String },

    /// Missing remote key, absent local cache, or unmatched filename
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed launch configuration
    #[error("Validation error: {0}")]
    Validation(String),

    /// Download interrupted by an external cancellation
    #[error("Download cancelled")]
    Cancelled,

    /// One or both renames into the image store failed
    #[error("Failed to place artifacts: {0:?}")]
    Placement(Vec<String>),

    /// Hypervisor process could not be spawned or waited on
    #[error("Launch error: {0}")]
    Launch(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for corex operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let error = CoreError::Network {
            url: "http://alpha.release.core-os.net/amd64-usr/current/version.txt".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Network error: http://alpha.release.core-os.net/amd64-usr/current/version.txt - connection refused"
        );
    }

    #[test]
    fn test_not_found_error_display() {
        let error = CoreError::NotFound("no local image files".to_string());
        assert_eq!(error.to_string(), "Not found: no local image files");
    }

    #[test]
    fn test_validation_error_display() {
        let error = CoreError::Validation("Invalid number of CPUs: 0".to_string());
        assert_eq!(error.to_string(), "Validation error: Invalid number of CPUs: 0");
    }

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(CoreError::Cancelled.to_string(), "Download cancelled");
    }

    #[test]
    fn test_placement_error_display() {
        let error = CoreError::Placement(vec![
            "rename vmlinuz: permission denied".to_string(),
            "rename vmlinuz.sig: permission denied".to_string(),
        ]);
        let rendered = error.to_string();
        assert!(rendered.starts_with("Failed to place artifacts"));
        assert!(rendered.contains("vmlinuz.sig"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let core_error: CoreError = io_error.into();
        assert!(matches!(core_error, CoreError::Io(_)));
        assert!(core_error.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_ok().unwrap(), 42);
    }
}
