//! `ScoreboardServer`: Axum HTTP + `WebSocket` server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use scoreboard_settings::ServerSettings;
use serde_json::json;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::commands::handle_command;
use crate::context::AppContext;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;
use crate::websocket::connection;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Score, viewers and persistence.
    pub ctx: Arc<AppContext>,
    /// Shutdown coordinator.
    pub shutdown: Arc<ShutdownCoordinator>,
    /// Prometheus handle for `/metrics`, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

/// The scoreboard server.
pub struct ScoreboardServer {
    settings: ServerSettings,
    ctx: Arc<AppContext>,
    shutdown: Arc<ShutdownCoordinator>,
    metrics: Option<PrometheusHandle>,
}

impl ScoreboardServer {
    /// Create a server over a loaded context.
    pub fn new(settings: ServerSettings, ctx: Arc<AppContext>) -> Self {
        Self {
            settings,
            ctx,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            metrics: None,
        }
    }

    /// Serve `/metrics` from this handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            ctx: Arc::clone(&self.ctx),
            shutdown: Arc::clone(&self.shutdown),
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/ws", get(ws_handler))
            .route("/score/{team}/{action}", post(score_handler))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve in a background task.
    ///
    /// Returns the bound address (useful with port `0`) and the task handle.
    /// The task ends once [`shutdown`](Self::shutdown) is triggered and
    /// in-flight requests have completed.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.settings.host, self.settings.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        let router = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await;
            if let Err(e) = result {
                warn!(error = %e, "server exited with error");
            }
        });

        info!(addr = %local_addr, "scoreboard server listening");
        Ok((local_addr, handle))
    }

    /// Trigger shutdown and wait for the server task, bounded by the configured timeout.
    pub async fn stop(&self, handle: JoinHandle<()>) -> bool {
        let timeout = Duration::from_secs(self.settings.shutdown_timeout_secs);
        self.shutdown.drain(handle, timeout).await
    }

    /// Shared context.
    pub fn context(&self) -> &Arc<AppContext> {
        &self.ctx
    }

    /// Shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }
}

/// GET /ws
async fn ws_handler(
    State(state): State<AppState>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            warn!(error = %rejection, "websocket upgrade rejected");
            return rejection.into_response();
        }
    };
    if state.ctx.registry.is_full() {
        warn!(
            connections = state.ctx.registry.len(),
            "viewer limit reached, refusing upgrade"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "too many viewers").into_response();
    }

    let token = state.shutdown.token();
    ws.on_failed_upgrade(|e| warn!(error = %e, "websocket upgrade failed"))
        .on_upgrade(move |socket| connection::accept(state.ctx, socket, token))
}

/// POST /score/{team}/{action}
async fn score_handler(
    State(state): State<AppState>,
    Path((team, action)): Path<(String, String)>,
) -> Json<serde_json::Value> {
    let _ = handle_command(&state.ctx, &team, &action).await;
    Json(json!({ "message": "Score updated" }))
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(
        state.ctx.start_time,
        state.ctx.registry.len(),
    ))
}

/// GET /metrics
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
