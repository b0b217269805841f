//! Error types for saiserver

use sai_native::SaiError;
use std::path::PathBuf;
use thiserror::Error;

/// Server startup and file loading errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A profile or port map file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed port map line
    #[error("Port map error at line {line}: {reason}")]
    PortMap { line: usize, reason: String },

    /// Switch bootstrap failed
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] SaiError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ServerError::FileRead {
            path: path.into(),
            source,
        }
    }
}

/// Result type for saiserver operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sai_native::SaiStatus;

    #[test]
    fn test_error_display() {
        let err = ServerError::Configuration("port must be > 0".to_string());
        assert_eq!(err.to_string(), "Configuration error: port must be > 0");
    }

    #[test]
    fn test_error_port_map() {
        let err = ServerError::PortMap {
            line: 3,
            reason: "missing lanes".to_string(),
        };
        assert_eq!(err.to_string(), "Port map error at line 3: missing lanes");
    }

    #[test]
    fn test_error_bootstrap_from_sai_error() {
        let err: ServerError = SaiError::driver(SaiStatus::FAILURE).into();
        assert_eq!(
            err.to_string(),
            "Bootstrap error: driver rejected the call: SAI_STATUS_FAILURE"
        );
    }

    #[test]
    fn test_error_file_read() {
        let err = ServerError::file_read(
            "/etc/sai/profile.ini",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "Failed to read /etc/sai/profile.ini: missing");
    }
}
