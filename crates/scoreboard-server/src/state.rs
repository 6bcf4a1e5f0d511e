//! The in-memory score record shared by all handlers.

use parking_lot::Mutex;
use scoreboard_core::{Action, ScoreRecord, Side};

/// Lock-guarded current score.
///
/// Readers always get a consistent copy; no half-applied command is ever
/// observable.
pub struct ScoreBoard {
    record: Mutex<ScoreRecord>,
}

impl ScoreBoard {
    /// Wrap the record loaded at startup.
    pub fn new(record: ScoreRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    /// Copy of the current record.
    pub fn snapshot(&self) -> ScoreRecord {
        self.record.lock().clone()
    }

    /// Move one side's score by one, never below zero.
    pub fn apply(&self, side: Side, action: Action) {
        self.record.lock().apply(side, action);
    }
}
