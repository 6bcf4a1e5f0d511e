//! Lifecycle of one viewer connection.
//!
//! ```text
//! join (under update lock)     run                       teardown
//! ───────────────────────      ─────────────────────     ──────────────────
//! try_add to registry    ──▶   writer: queue → socket ─▶ remove from registry
//! queue initial snapshot       reader: discard frames    close subscriber
//!                              stop on first exit        close socket
//! ```
//!
//! The connection ends when the socket errors or closes, when a broadcast
//! prunes the subscriber, or on server shutdown.

use std::fmt::Display;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::subscriber::Subscriber;
use crate::context::AppContext;
use crate::metrics::{WS_CONNECTIONS_TOTAL, WS_DISCONNECTIONS_TOTAL};

/// Why a viewer connection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The registry was at capacity.
    Rejected,
    /// The initial snapshot could not be queued.
    SnapshotFailed,
    /// Writing to the socket failed.
    SendFailed(String),
    /// Reading from the socket failed.
    ReceiveFailed(String),
    /// The client sent a close frame or the stream ended.
    RemoteClosed,
    /// A broadcast dropped the subscriber.
    Pruned,
    /// The server is shutting down.
    Shutdown,
}

impl CloseReason {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Rejected => "rejected",
            Self::SnapshotFailed => "snapshot_failed",
            Self::SendFailed(_) => "send_failed",
            Self::ReceiveFailed(_) => "receive_failed",
            Self::RemoteClosed => "remote_closed",
            Self::Pruned => "pruned",
            Self::Shutdown => "shutdown",
        }
    }
}

/// Serve an upgraded `WebSocket` until it closes.
pub async fn accept(ctx: Arc<AppContext>, socket: WebSocket, shutdown: CancellationToken) {
    let (sink, stream) = socket.split();
    let _ = serve(&ctx, sink, stream, shutdown).await;
}

/// Drive one viewer over any message sink/stream pair.
///
/// Inbound payloads are read and discarded; only errors and close frames
/// matter.
pub async fn serve<S, R, E>(
    ctx: &AppContext,
    mut sink: S,
    mut stream: R,
    shutdown: CancellationToken,
) -> CloseReason
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let (subscriber, mut rx) = Subscriber::channel(ctx.send_queue_capacity);
    let subscriber = Arc::new(subscriber);

    let joined = {
        let _sequence = ctx.update_lock.lock().await;
        if ctx.registry.try_add(Arc::clone(&subscriber)) {
            if ctx.broadcaster.send_snapshot(&subscriber) {
                Ok(())
            } else {
                Err(CloseReason::SnapshotFailed)
            }
        } else {
            Err(CloseReason::Rejected)
        }
    };
    if let Err(reason) = joined {
        warn!(subscriber_id = %subscriber.id, reason = reason.as_str(), "viewer not admitted");
        teardown(ctx, &subscriber);
        let _ = sink.close().await;
        return reason;
    }

    metrics::counter!(WS_CONNECTIONS_TOTAL).increment(1);
    info!(
        subscriber_id = %subscriber.id,
        connections = ctx.registry.len(),
        "viewer connected"
    );

    let writer = async {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sink.send(Message::Text(frame)).await {
                return CloseReason::SendFailed(e.to_string());
            }
        }
        CloseReason::Pruned
    };

    let reader = async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Close(_))) | None => return CloseReason::RemoteClosed,
                Some(Ok(_)) => {}
                Some(Err(e)) => return CloseReason::ReceiveFailed(e.to_string()),
            }
        }
    };

    let reason = tokio::select! {
        reason = writer => reason,
        reason = reader => reason,
        () = subscriber.closed() => CloseReason::Pruned,
        () = shutdown.cancelled() => CloseReason::Shutdown,
    };

    teardown(ctx, &subscriber);
    if let Err(e) = sink.close().await {
        debug!(subscriber_id = %subscriber.id, error = %e, "socket close failed");
    }

    metrics::counter!(WS_DISCONNECTIONS_TOTAL).increment(1);
    match &reason {
        CloseReason::SendFailed(error) | CloseReason::ReceiveFailed(error) => warn!(
            subscriber_id = %subscriber.id,
            reason = reason.as_str(),
            error = %error,
            age_secs = subscriber.age().as_secs(),
            "viewer disconnected"
        ),
        _ => info!(
            subscriber_id = %subscriber.id,
            reason = reason.as_str(),
            age_secs = subscriber.age().as_secs(),
            "viewer disconnected"
        ),
    }
    reason
}

fn teardown(ctx: &AppContext, subscriber: &Subscriber) {
    let _ = ctx.registry.remove(&subscriber.id);
    subscriber.close();
}
