//! # scoreboard-core
//!
//! Foundation types shared by every scoreboard crate:
//!
//! - [`score`]: the [`ScoreRecord`] entity and the [`ScoreCommand`] that mutates it
//! - [`ids`]: branded subscriber identifiers
//! - [`logging`]: `tracing` subscriber bootstrap

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;
pub mod score;

pub use ids::SubscriberId;
pub use logging::{LogFormat, init_subscriber, with_startup_logging, with_startup_logging_to};
pub use score::{Action, ScoreCommand, ScoreRecord, Side};
