//! Score command handling: apply, persist, broadcast.

use std::sync::Arc;

use scoreboard_core::ScoreCommand;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::metrics::{SCORE_COMMANDS_TOTAL, SCORE_SAVE_FAILURES_TOTAL};

/// What a command did to the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command was recognized and applied.
    Applied(ScoreCommand),
    /// Unknown team or action; the score is unchanged.
    Ignored,
}

/// Run one score command to completion.
///
/// Unrecognized segments leave the score untouched, but the record is still
/// saved and broadcast. A failed save is logged and counted; it never fails
/// the command.
///
/// The sequence runs on its own task. Dropping the returned future (a client
/// hanging up mid-request) does not stop a command that has started.
pub async fn handle_command(ctx: &Arc<AppContext>, team: &str, action: &str) -> CommandOutcome {
    let task = tokio::spawn(run_command(
        Arc::clone(ctx),
        team.to_owned(),
        action.to_owned(),
    ));
    match task.await {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            warn!(team, action, error = %e, "score command task cancelled");
            CommandOutcome::Ignored
        }
    }
}

async fn run_command(ctx: Arc<AppContext>, team: String, action: String) -> CommandOutcome {
    let (team, action) = (team.as_str(), action.as_str());
    let _sequence = ctx.update_lock.lock().await;

    let outcome = match ScoreCommand::parse(team, action) {
        Some(command) => {
            ctx.board.apply(command.side, command.action);
            CommandOutcome::Applied(command)
        }
        None => {
            debug!(team, action, "unrecognized score command, score unchanged");
            CommandOutcome::Ignored
        }
    };
    let label = match outcome {
        CommandOutcome::Applied(_) => "applied",
        CommandOutcome::Ignored => "ignored",
    };
    metrics::counter!(SCORE_COMMANDS_TOTAL, "outcome" => label).increment(1);

    let snapshot = ctx.board.snapshot();
    info!(team, action, outcome = label, score = %snapshot, "score command handled");
    if let Err(e) = Arc::clone(&ctx.store).save_async(snapshot).await {
        metrics::counter!(SCORE_SAVE_FAILURES_TOTAL).increment(1);
        warn!(path = %ctx.store.path().display(), error = %e, "failed to save scores");
    }

    let _ = ctx.broadcaster.broadcast();
    outcome
}
