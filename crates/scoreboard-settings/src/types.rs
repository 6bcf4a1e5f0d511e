//! Settings types.
//!
//! Every struct uses `#[serde(default)]` so a settings file only needs the
//! keys it overrides.

use std::path::PathBuf;

use scoreboard_core::LogFormat;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreboardSettings {
    /// Path of the persisted score file. Must exist at startup.
    pub score_file: PathBuf,
    /// Network and connection settings.
    pub server: ServerSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

impl Default for ScoreboardSettings {
    fn default() -> Self {
        Self {
            score_file: PathBuf::from("scores.json"),
            server: ServerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ScoreboardSettings {
    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.score_file.as_os_str().is_empty() {
            return Err(SettingsError::InvalidValue("scoreFile must not be empty".into()));
        }
        if self.server.send_queue_capacity == 0 {
            return Err(SettingsError::InvalidValue(
                "server.sendQueueCapacity must be at least 1".into(),
            ));
        }
        if self.server.max_subscribers == Some(0) {
            return Err(SettingsError::InvalidValue(
                "server.maxSubscribers must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

/// Server network and connection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` picks a free port).
    pub port: u16,
    /// Outbound frames queued per viewer before a push counts as failed.
    pub send_queue_capacity: usize,
    /// Upper bound on simultaneous viewers. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_subscribers: Option<usize>,
    /// How long shutdown waits for connection tasks to finish.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            send_queue_capacity: 64,
            max_subscribers: None,
            shutdown_timeout_secs: 10,
        }
    }
}

/// Log output settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// stderr output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8080() {
        let s = ScoreboardSettings::default();
        assert_eq!(s.score_file, PathBuf::from("scores.json"));
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.server.port, 8080);
        assert_eq!(s.server.max_subscribers, None);
        assert_eq!(s.logging.level, "info");
        assert_eq!(s.logging.format, LogFormat::Compact);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ScoreboardSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_queue_capacity_is_invalid() {
        let mut s = ScoreboardSettings::default();
        s.server.send_queue_capacity = 0;
        assert!(matches!(s.validate(), Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    fn zero_max_subscribers_is_invalid() {
        let mut s = ScoreboardSettings::default();
        s.server.max_subscribers = Some(0);
        assert!(matches!(s.validate(), Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    fn empty_score_file_is_invalid() {
        let mut s = ScoreboardSettings::default();
        s.score_file = PathBuf::new();
        assert!(s.validate().is_err());
    }

    #[test]
    fn serializes_camel_case_and_skips_unset_cap() {
        let json = serde_json::to_value(ScoreboardSettings::default()).unwrap();
        assert_eq!(json["scoreFile"], "scores.json");
        assert_eq!(json["server"]["sendQueueCapacity"], 64);
        assert!(json["server"].get("maxSubscribers").is_none());
        assert_eq!(json["logging"]["format"], "compact");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: ScoreboardSettings =
            serde_json::from_str(r#"{"server":{"port":9000}}"#).unwrap();
        assert_eq!(s.server.port, 9000);
        assert_eq!(s.server.host, "0.0.0.0");
        assert_eq!(s.score_file, PathBuf::from("scores.json"));
    }
}
