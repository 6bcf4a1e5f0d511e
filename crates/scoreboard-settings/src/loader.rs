//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ScoreboardSettings::default()`]
//! 2. If a settings file was given, deep-merge its values over the defaults
//! 3. Apply `SCOREBOARD_*` environment variable overrides
//! 4. Validate
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use scoreboard_core::LogFormat;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::ScoreboardSettings;

/// Load settings from an optional file plus the process environment.
///
/// Unlike the score file, the settings file is optional; but when a path is
/// given it must exist and contain valid JSON.
pub fn load_settings(path: Option<&Path>) -> Result<ScoreboardSettings> {
    load_settings_with(path, |name| std::env::var(name).ok())
}

/// [`load_settings`] with an injectable environment lookup.
pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ScoreboardSettings> {
    let defaults = serde_json::to_value(ScoreboardSettings::default())?;

    let merged = match path {
        Some(path) => {
            debug!(?path, "loading settings from file");
            let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            let user: Value = serde_json::from_str(&content)?;
            deep_merge(defaults, user)
        }
        None => defaults,
    };

    let mut settings: ScoreboardSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Invalid values are logged and ignored (falling back to file/default).
pub fn apply_env_overrides(
    settings: &mut ScoreboardSettings,
    env: impl Fn(&str) -> Option<String>,
) {
    let env = |name: &str| env(name).filter(|v| !v.is_empty());

    if let Some(v) = env("SCOREBOARD_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = env("SCOREBOARD_PORT") {
        match parse_u16_range(&v, 1, u16::MAX) {
            Some(port) => settings.server.port = port,
            None => warn!(
                key = "SCOREBOARD_PORT",
                value = %v,
                "invalid port env var, ignoring"
            ),
        }
    }
    if let Some(v) = env("SCOREBOARD_SCORE_FILE") {
        settings.score_file = PathBuf::from(v);
    }
    if let Some(v) = env("SCOREBOARD_SEND_QUEUE") {
        match parse_usize_range(&v, 1, 65_536) {
            Some(n) => settings.server.send_queue_capacity = n,
            None => warn!(
                key = "SCOREBOARD_SEND_QUEUE",
                value = %v,
                "invalid usize env var, ignoring"
            ),
        }
    }
    if let Some(v) = env("SCOREBOARD_MAX_SUBSCRIBERS") {
        match parse_usize_range(&v, 1, 1_000_000) {
            Some(n) => settings.server.max_subscribers = Some(n),
            None => warn!(
                key = "SCOREBOARD_MAX_SUBSCRIBERS",
                value = %v,
                "invalid usize env var, ignoring"
            ),
        }
    }
    if let Some(v) = env("SCOREBOARD_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = env("SCOREBOARD_LOG_FORMAT") {
        match LogFormat::parse(&v) {
            Some(format) => settings.logging.format = format,
            None => warn!(
                key = "SCOREBOARD_LOG_FORMAT",
                value = %v,
                "invalid log format env var, ignoring"
            ),
        }
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.trim().parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
