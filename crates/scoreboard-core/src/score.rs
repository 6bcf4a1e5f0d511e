//! The score record and the commands that mutate it.
//!
//! A [`ScoreRecord`] holds two team labels and two non-negative scores. It is
//! mutated only through [`ScoreRecord::apply`], which clamps subtraction at
//! zero, and rendered for viewers through its [`Display`](fmt::Display) impl.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two teams on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// First team (`teamA` in the score file).
    A,
    /// Second team (`teamB` in the score file).
    B,
}

impl Side {
    /// Parse a route segment (`"a"` or `"b"`). Anything else is unrecognized.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "a" => Some(Self::A),
            "b" => Some(Self::B),
            _ => None,
        }
    }

    /// Route segment for this side.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// Score mutation requested by a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Increment by one.
    Add,
    /// Decrement by one, never below zero.
    Subtract,
}

impl Action {
    /// Parse a route segment (`"add"` or `"subtract"`). Anything else is unrecognized.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            _ => None,
        }
    }

    /// Route segment for this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

/// A validated `(side, action)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScoreCommand {
    /// Which team's score changes.
    pub side: Side,
    /// How it changes.
    pub action: Action,
}

impl ScoreCommand {
    /// Build a command from raw route segments.
    ///
    /// Returns `None` when either segment is unrecognized; callers treat that
    /// as a no-op rather than an error.
    pub fn parse(team: &str, action: &str) -> Option<Self> {
        Some(Self {
            side: Side::parse(team)?,
            action: Action::parse(action)?,
        })
    }
}

/// Team labels and scores, as persisted in the score file.
///
/// Field order here is the field order on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// Label for side A.
    pub team_a: String,
    /// Label for side B.
    pub team_b: String,
    /// Score for side A.
    pub team_a_score: u32,
    /// Score for side B.
    pub team_b_score: u32,
}

impl ScoreRecord {
    /// Create a record with both scores at zero.
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self {
            team_a: team_a.into(),
            team_b: team_b.into(),
            team_a_score: 0,
            team_b_score: 0,
        }
    }

    /// Current score for one side.
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.team_a_score,
            Side::B => self.team_b_score,
        }
    }

    /// Apply one command in place.
    pub fn apply(&mut self, side: Side, action: Action) {
        let score = match side {
            Side::A => &mut self.team_a_score,
            Side::B => &mut self.team_b_score,
        };
        *score = match action {
            Action::Add => score.saturating_add(1),
            Action::Subtract => score.saturating_sub(1),
        };
    }
}

/// Viewer-facing snapshot: `"{teamA}: {scoreA} | {teamB}: {scoreB}"`.
impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {}: {}",
            self.team_a, self.team_a_score, self.team_b, self.team_b_score
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn red_blue() -> ScoreRecord {
        ScoreRecord::new("Red", "Blue")
    }

    #[test]
    fn parse_side_segments() {
        assert_eq!(Side::parse("a"), Some(Side::A));
        assert_eq!(Side::parse("b"), Some(Side::B));
        assert_eq!(Side::parse("c"), None);
        assert_eq!(Side::parse("A"), None);
        assert_eq!(Side::parse(""), None);
    }

    #[test]
    fn parse_action_segments() {
        assert_eq!(Action::parse("add"), Some(Action::Add));
        assert_eq!(Action::parse("subtract"), Some(Action::Subtract));
        assert_eq!(Action::parse("sub"), None);
        assert_eq!(Action::parse("Add"), None);
    }

    #[test]
    fn segments_round_trip_through_as_str() {
        for side in [Side::A, Side::B] {
            assert_eq!(Side::parse(side.as_str()), Some(side));
        }
        for action in [Action::Add, Action::Subtract] {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn command_requires_both_segments() {
        assert_eq!(
            ScoreCommand::parse("b", "subtract"),
            Some(ScoreCommand {
                side: Side::B,
                action: Action::Subtract
            })
        );
        assert!(ScoreCommand::parse("c", "add").is_none());
        assert!(ScoreCommand::parse("a", "multiply").is_none());
    }

    #[test]
    fn add_increments_only_one_side() {
        let mut rec = red_blue();
        rec.apply(Side::A, Action::Add);
        rec.apply(Side::A, Action::Add);
        rec.apply(Side::B, Action::Add);
        assert_eq!(rec.team_a_score, 2);
        assert_eq!(rec.team_b_score, 1);
    }

    #[test]
    fn subtract_at_zero_is_noop() {
        let mut rec = red_blue();
        rec.apply(Side::B, Action::Subtract);
        assert_eq!(rec, red_blue());
    }

    #[test]
    fn add_saturates_at_max() {
        let mut rec = red_blue();
        rec.team_a_score = u32::MAX;
        rec.apply(Side::A, Action::Add);
        assert_eq!(rec.team_a_score, u32::MAX);
    }

    #[test]
    fn display_format() {
        let mut rec = red_blue();
        rec.apply(Side::A, Action::Add);
        assert_eq!(rec.to_string(), "Red: 1 | Blue: 0");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let rec = ScoreRecord {
            team_a: "Red".into(),
            team_b: "Blue".into(),
            team_a_score: 3,
            team_b_score: 7,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"teamA":"Red","teamB":"Blue","teamAScore":3,"teamBScore":7}"#
        );
    }

    #[test]
    fn negative_score_fails_to_decode() {
        let json = r#"{"teamA":"Red","teamB":"Blue","teamAScore":-1,"teamBScore":0}"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }

    #[test]
    fn missing_field_fails_to_decode() {
        let json = r#"{"teamA":"Red","teamB":"Blue","teamAScore":1}"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }

    fn command_strategy() -> impl Strategy<Value = (Side, Action)> {
        (
            prop_oneof![Just(Side::A), Just(Side::B)],
            prop_oneof![Just(Action::Add), Just(Action::Subtract)],
        )
    }

    proptest! {
        #[test]
        fn scores_track_a_clamped_counter(
            commands in proptest::collection::vec(command_strategy(), 0..200)
        ) {
            let mut rec = red_blue();
            let mut expected = [0i64, 0i64];
            for (side, action) in commands {
                rec.apply(side, action);
                let slot = match side { Side::A => 0, Side::B => 1 };
                expected[slot] = match action {
                    Action::Add => expected[slot] + 1,
                    Action::Subtract => (expected[slot] - 1).max(0),
                };
                prop_assert_eq!(i64::from(rec.score(Side::A)), expected[0]);
                prop_assert_eq!(i64::from(rec.score(Side::B)), expected[1]);
            }
        }
    }
}
