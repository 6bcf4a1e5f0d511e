//! # scoreboard-server
//!
//! Axum HTTP + `WebSocket` server for the live scoreboard.
//!
//! - `POST /score/{team}/{action}`: mutate, persist, broadcast
//! - `GET /ws`: push channel; one snapshot on join, then one per command
//! - `GET /health`, `GET /metrics`: probes
//!
//! All handlers share one [`AppContext`](context::AppContext) built at startup.

#![deny(unsafe_code)]

pub mod commands;
pub mod context;
pub mod health;
pub mod metrics;
pub mod server;
pub mod shutdown;
pub mod state;
pub mod websocket;

pub use commands::{CommandOutcome, handle_command};
pub use context::AppContext;
pub use server::ScoreboardServer;
