//! # scoreboard-settings
//!
//! Configuration with layered sources. In priority order, lowest first:
//! 1. **Compiled defaults**: [`ScoreboardSettings::default()`]
//! 2. **Settings file**: optional JSON file deep-merged over the defaults
//! 3. **Environment variables**: `SCOREBOARD_*` overrides
//!
//! The binary applies CLI flags on top of the loaded value. With nothing
//! configured the server listens on `0.0.0.0:8080` and uses `scores.json` in
//! the working directory.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, deep_merge, load_settings, load_settings_with};
pub use types::{LoggingSettings, ScoreboardSettings, ServerSettings};
