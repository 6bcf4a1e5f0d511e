//! Push-channel management.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `subscriber` | One viewer: outbound frame queue plus close signal |
//! | `registry` | Identity-keyed set of live subscribers |
//! | `broadcast` | Snapshot fan-out, pruning subscribers that fail |
//! | `connection` | Upgrade-to-close lifecycle of one viewer |

pub mod broadcast;
pub mod connection;
pub mod registry;
pub mod subscriber;
