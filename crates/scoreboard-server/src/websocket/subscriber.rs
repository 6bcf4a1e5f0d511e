//! One connected viewer.

use std::time::{Duration, Instant};

use axum::extract::ws::Utf8Bytes;
use scoreboard_core::SubscriberId;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A registered push-channel connection.
///
/// Frames are queued on a bounded channel that the connection's writer
/// drains. A push that cannot be queued (full or closed) is a failed
/// delivery and the caller drops the subscriber.
pub struct Subscriber {
    /// Unique connection ID.
    pub id: SubscriberId,
    tx: mpsc::Sender<Utf8Bytes>,
    closed: CancellationToken,
    /// When the connection was accepted.
    pub connected_at: Instant,
}

impl Subscriber {
    /// Create a subscriber with a fresh ID and an outbound queue of `capacity` frames.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Utf8Bytes>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(SubscriberId::new(), tx), rx)
    }

    /// Wrap an existing sender.
    pub fn new(id: SubscriberId, tx: mpsc::Sender<Utf8Bytes>) -> Self {
        Self {
            id,
            tx,
            closed: CancellationToken::new(),
            connected_at: Instant::now(),
        }
    }

    /// Queue a text frame. Returns `false` if the subscriber is closed or its queue is full.
    pub fn send(&self, frame: Utf8Bytes) -> bool {
        !self.closed.is_cancelled() && self.tx.try_send(frame).is_ok()
    }

    /// Signal the connection task to stop. Idempotent.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once [`close`](Self::close) has been called.
    pub async fn closed(&self) {
        self.closed.cancelled().await;
    }

    /// Connection age.
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_queues_frame() {
        let (sub, mut rx) = Subscriber::channel(4);
        assert!(sub.send("Red: 0 | Blue: 0".into()));
        assert_eq!(rx.recv().await.unwrap().as_str(), "Red: 0 | Blue: 0");
    }

    #[test]
    fn send_to_dropped_receiver_fails() {
        let (sub, rx) = Subscriber::channel(4);
        drop(rx);
        assert!(!sub.send("x".into()));
    }

    #[test]
    fn send_to_full_queue_fails() {
        let (sub, _rx) = Subscriber::channel(1);
        assert!(sub.send("first".into()));
        assert!(!sub.send("second".into()));
    }

    #[test]
    fn send_after_close_fails() {
        let (sub, _rx) = Subscriber::channel(4);
        sub.close();
        assert!(sub.is_closed());
        assert!(!sub.send("x".into()));
    }

    #[tokio::test]
    async fn closed_resolves_after_close() {
        let (sub, _rx) = Subscriber::channel(4);
        sub.close();
        sub.close();
        sub.closed().await;
    }

    #[test]
    fn ids_are_unique() {
        let (a, _ra) = Subscriber::channel(1);
        let (b, _rb) = Subscriber::channel(1);
        assert_ne!(a.id, b.id);
        assert!(a.age() < Duration::from_secs(5));
    }
}
