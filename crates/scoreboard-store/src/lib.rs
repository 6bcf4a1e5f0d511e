//! # scoreboard-store
//!
//! Persistence adapter for the score record.
//!
//! The score file is a JSON object with the fields `teamA`, `teamB`,
//! `teamAScore` and `teamBScore`, pretty-printed with two-space indentation.
//! It must exist before the server starts; [`ScoreStore::load`] failing is
//! fatal at startup, while [`ScoreStore::save`] failures are logged by the
//! caller and never interrupt a broadcast.

#![deny(unsafe_code)]

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::ScoreStore;
