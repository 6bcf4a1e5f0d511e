//! Shared server state.

use std::sync::Arc;
use std::time::Instant;

use scoreboard_core::ScoreRecord;
use scoreboard_settings::ServerSettings;
use scoreboard_store::{ScoreStore, StoreError};
use tokio::sync::Mutex;

use crate::state::ScoreBoard;
use crate::websocket::broadcast::Broadcaster;
use crate::websocket::registry::SubscriberRegistry;

/// Everything the HTTP and `WebSocket` handlers share.
///
/// `update_lock` orders score commands against each other and against
/// viewer joins. A command holds it across apply, save and broadcast; a join
/// holds it across registration and the initial snapshot. So each viewer sees
/// one snapshot per command, in command order, and its first frame is never
/// older than anything broadcast after it.
pub struct AppContext {
    /// Current score.
    pub board: Arc<ScoreBoard>,
    /// Connected viewers.
    pub registry: Arc<SubscriberRegistry>,
    /// Snapshot fan-out over `board` and `registry`.
    pub broadcaster: Broadcaster,
    /// Score file persistence.
    pub store: Arc<ScoreStore>,
    /// Serializes command sequences and viewer joins.
    pub update_lock: Mutex<()>,
    /// Per-viewer outbound queue length.
    pub send_queue_capacity: usize,
    /// When the context was created.
    pub start_time: Instant,
}

impl AppContext {
    /// Build a context around an already-loaded record.
    pub fn new(record: ScoreRecord, store: ScoreStore, settings: &ServerSettings) -> Self {
        let board = Arc::new(ScoreBoard::new(record));
        let registry = Arc::new(SubscriberRegistry::with_capacity(settings.max_subscribers));
        Self {
            broadcaster: Broadcaster::new(Arc::clone(&board), Arc::clone(&registry)),
            board,
            registry,
            store: Arc::new(store),
            update_lock: Mutex::new(()),
            send_queue_capacity: settings.send_queue_capacity,
            start_time: Instant::now(),
        }
    }

    /// Load the score file and build a context around it.
    pub fn load(store: ScoreStore, settings: &ServerSettings) -> Result<Self, StoreError> {
        let record = store.load()?;
        Ok(Self::new(record, store, settings))
    }
}
