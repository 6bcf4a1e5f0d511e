//! # scoreboard
//!
//! Scoreboard server binary: resolves settings, loads the score file and
//! serves HTTP commands plus the `WebSocket` push channel until signalled.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use scoreboard_core::{init_subscriber, with_startup_logging};
use scoreboard_server::shutdown::wait_for_signal;
use scoreboard_server::{AppContext, ScoreboardServer};
use scoreboard_settings::{ScoreboardSettings, load_settings};
use scoreboard_store::ScoreStore;
use tracing::{error, info, warn};

/// Live two-team scoreboard server.
#[derive(Parser, Debug)]
#[command(name = "scoreboard", about = "Live two-team scoreboard server")]
struct Cli {
    /// Host to bind.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 for auto-assign).
    #[arg(long)]
    port: Option<u16>,

    /// Score file to load at startup and rewrite after every command.
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset (e.g. `info`, `scoreboard_server=debug`).
    #[arg(long)]
    log_level: Option<String>,

    /// Optional JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags override every other settings source.
    fn apply_to(&self, settings: &mut ScoreboardSettings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(path) = &self.score_file {
            settings.score_file.clone_from(path);
        }
        if let Some(level) = &self.log_level {
            settings.logging.level.clone_from(level);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let startup_level = cli.log_level.as_deref().unwrap_or("info");
    let mut settings = with_startup_logging(startup_level, || {
        load_settings(cli.settings.as_deref())
    })
    .context("Failed to load settings")?;
    cli.apply_to(&mut settings);
    settings.validate().context("Invalid settings")?;

    init_subscriber(&settings.logging.level, settings.logging.format);

    let score_file = settings.score_file.clone();
    let ctx = AppContext::load(ScoreStore::new(&score_file), &settings.server)
        .inspect_err(|e| {
            error!(path = %score_file.display(), error = %e, "failed to load scores");
        })
        .with_context(|| format!("Failed to load score file: {}", score_file.display()))?;
    info!(
        path = %score_file.display(),
        score = %ctx.board.snapshot(),
        "scores loaded"
    );

    let metrics = scoreboard_server::metrics::install_recorder()
        .context("Failed to install metrics recorder")?;

    let server =
        ScoreboardServer::new(settings.server.clone(), Arc::new(ctx)).with_metrics(metrics);
    let (addr, handle) = server.listen().await.with_context(|| {
        format!(
            "Failed to bind {}:{}",
            settings.server.host, settings.server.port
        )
    })?;
    info!(%addr, "scoreboard ready");

    wait_for_signal().await;
    info!("shutting down");
    if !server.stop(handle).await {
        warn!("server did not stop cleanly");
    }
    Ok(())
}
