//! Errors raised while reading `scoreboard.json` or checking its values.

use std::path::PathBuf;

use thiserror::Error;

/// Why the scoreboard settings could not be produced.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be opened or read.
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings file is not JSON, or its fields have the wrong shape.
    #[error("settings file is not valid scoreboard JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A merged value the server cannot start with: an empty `scoreFile`,
    /// `server.sendQueueCapacity` of 0, or `server.maxSubscribers` of 0.
    #[error("unusable scoreboard setting: {0}")]
    InvalidValue(String),
}

/// Result alias for settings loading.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScoreboardSettings;

    #[test]
    fn read_error_names_the_file() {
        let err = SettingsError::Read {
            path: PathBuf::from("/etc/scoreboard.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/scoreboard.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn json_error_mentions_scoreboard_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{port:").unwrap_err();
        let err = SettingsError::from(json_err);
        assert!(err.to_string().starts_with("settings file is not valid scoreboard JSON"));
    }

    #[test]
    fn zero_queue_capacity_is_reported_by_field_name() {
        let mut settings = ScoreboardSettings::default();
        settings.server.send_queue_capacity = 0;
        let err = settings.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unusable scoreboard setting: server.sendQueueCapacity must be at least 1"
        );
    }

    #[test]
    fn empty_score_file_is_reported_by_field_name() {
        let mut settings = ScoreboardSettings::default();
        settings.score_file = PathBuf::new();
        let err = settings.validate().unwrap_err();
        assert_eq!(err.to_string(), "unusable scoreboard setting: scoreFile must not be empty");
    }
}
