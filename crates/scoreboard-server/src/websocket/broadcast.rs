//! Snapshot fan-out to connected viewers.

use std::sync::Arc;

use axum::extract::ws::Utf8Bytes;
use tracing::{debug, warn};

use super::registry::SubscriberRegistry;
use super::subscriber::Subscriber;
use crate::metrics::{WS_BROADCAST_PRUNES_TOTAL, WS_BROADCASTS_TOTAL};
use crate::state::ScoreBoard;

/// Result of one broadcast round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers the frame was queued for.
    pub delivered: usize,
    /// Subscribers dropped because the push failed.
    pub pruned: usize,
}

/// Renders the current score and pushes it to every registered viewer.
///
/// A viewer whose push fails is removed from the registry and closed, and
/// the round continues with the rest.
pub struct Broadcaster {
    board: Arc<ScoreBoard>,
    registry: Arc<SubscriberRegistry>,
}

impl Broadcaster {
    /// Create a broadcaster over a board and its viewers.
    pub fn new(board: Arc<ScoreBoard>, registry: Arc<SubscriberRegistry>) -> Self {
        Self { board, registry }
    }

    /// Current score in display form.
    pub fn render(&self) -> Utf8Bytes {
        Utf8Bytes::from(self.board.snapshot().to_string())
    }

    /// Push the current score to every registered subscriber.
    pub fn broadcast(&self) -> BroadcastReport {
        let frame = self.render();
        let mut report = BroadcastReport::default();
        let mut failed = Vec::new();

        self.registry.for_each(|sub| {
            if sub.send(frame.clone()) {
                report.delivered += 1;
            } else {
                failed.push(Arc::clone(sub));
            }
        });

        for sub in &failed {
            self.prune(sub);
        }
        report.pruned = failed.len();

        metrics::counter!(WS_BROADCASTS_TOTAL).increment(1);
        debug!(
            frame = frame.as_str(),
            delivered = report.delivered,
            pruned = report.pruned,
            "broadcast score"
        );
        report
    }

    /// Push the current score to a single subscriber.
    pub fn send_snapshot(&self, subscriber: &Subscriber) -> bool {
        subscriber.send(self.render())
    }

    fn prune(&self, subscriber: &Subscriber) {
        let _ = self.registry.remove(&subscriber.id);
        subscriber.close();
        metrics::counter!(WS_BROADCAST_PRUNES_TOTAL).increment(1);
        warn!(subscriber_id = %subscriber.id, "push failed, dropping viewer");
    }
}
