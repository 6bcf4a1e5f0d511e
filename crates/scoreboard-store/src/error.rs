//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the score file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The score file could not be read or written.
    #[error("score file I/O failed for {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The score file is not a valid score record.
    #[error("score file {} is malformed: {source}", path.display())]
    Decode {
        /// File being decoded.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The in-memory record could not be serialized.
    #[error("failed to encode score record: {0}")]
    Encode(#[from] serde_json::Error),
    /// The blocking save task panicked or was cancelled.
    #[error("save task failed: {0}")]
    Task(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("scores.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("scores.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn decode_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let err = StoreError::Decode {
            path: PathBuf::from("/tmp/s.json"),
            source: json_err,
        };
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn encode_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Encode(_)));
    }
}
