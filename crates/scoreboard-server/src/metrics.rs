//! Prometheus metrics recorder and metric names.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus recorder globally.
///
/// Call once at startup before anything is recorded. Fails if another
/// recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("prometheus metrics recorder installed");
    Ok(handle)
}

/// Score commands handled (counter, labels: outcome = applied | ignored).
pub const SCORE_COMMANDS_TOTAL: &str = "score_commands_total";
/// Saves that failed after a command (counter).
pub const SCORE_SAVE_FAILURES_TOTAL: &str = "score_save_failures_total";
/// Viewer connections opened (counter).
pub const WS_CONNECTIONS_TOTAL: &str = "ws_connections_total";
/// Viewer connections closed (counter).
pub const WS_DISCONNECTIONS_TOTAL: &str = "ws_disconnections_total";
/// Currently registered viewers (gauge).
pub const WS_CONNECTIONS_ACTIVE: &str = "ws_connections_active";
/// Broadcast rounds (counter).
pub const WS_BROADCASTS_TOTAL: &str = "ws_broadcasts_total";
/// Viewers dropped because a push to them failed (counter).
pub const WS_BROADCAST_PRUNES_TOTAL: &str = "ws_broadcast_prunes_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_recorder_renders() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            metrics::counter!(SCORE_COMMANDS_TOTAL, "outcome" => "applied").increment(2);
        });
        let output = handle.render();
        assert!(output.contains("score_commands_total"));
        assert!(output.contains("outcome=\"applied\""));
    }

    #[test]
    fn metric_names_are_snake_case() {
        let names = [
            SCORE_COMMANDS_TOTAL,
            SCORE_SAVE_FAILURES_TOTAL,
            WS_CONNECTIONS_TOTAL,
            WS_DISCONNECTIONS_TOTAL,
            WS_CONNECTIONS_ACTIVE,
            WS_BROADCASTS_TOTAL,
            WS_BROADCAST_PRUNES_TOTAL,
        ];
        for name in names {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{name} is not snake_case"
            );
        }
    }
}
