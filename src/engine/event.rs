//! Engine event vocabulary and outcomes.
//!
//! Inbound: `GameEvent`. Every event gets an `EventOutcome` back; illegal
//! events come back as `Rejected` with the state untouched.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, GameId, RallyRecord, RowKey, Team};
use crate::rules::{GameOutcome, Transition};

/// Display names for the four players. Informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(rename = "A1")]
    pub a1: String,
    #[serde(rename = "A2")]
    pub a2: String,
    #[serde(rename = "B1")]
    pub b1: String,
    #[serde(rename = "B2")]
    pub b2: String,
}

impl Roster {
    /// Names in scoresheet order A1, A2, B1, B2.
    pub fn new(
        a1: impl Into<String>,
        a2: impl Into<String>,
        b1: impl Into<String>,
        b2: impl Into<String>,
    ) -> Self {
        Self {
            a1: a1.into(),
            a2: a2.into(),
            b1: b1.into(),
            b2: b2.into(),
        }
    }

    /// Name in a given row. Empty when unnamed.
    #[must_use]
    pub fn name(&self, key: RowKey) -> &str {
        match key.index() {
            0 => &self.a1,
            1 => &self.a2,
            2 => &self.b1,
            _ => &self.b2,
        }
    }
}

/// Everything the engine accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    GameLoaded { config: GameConfig, roster: Roster },
    RallyWon { winner: Team },
    ToggleServeSide,
    Undo,
    Let,
    ConfirmGameOver,
}

/// Why an event was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// No `GameLoaded` yet.
    NotConfigured,
    /// `GameLoaded` after the game already started.
    AlreadyConfigured,
    /// `GameLoaded` with out-of-range numbers.
    InvalidConfig,
    /// Rally or let outside live play.
    NotInPlay,
    /// Side is fixed by the rotation right now.
    SideNotChoosable,
    /// Undo with empty history, or after confirmation.
    NothingToUndo,
    /// Confirmation while the game is still undecided.
    NotAwaitingConfirmation,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::NotConfigured => "game not configured",
            RejectReason::AlreadyConfigured => "game already configured",
            RejectReason::InvalidConfig => "invalid game configuration",
            RejectReason::NotInPlay => "game not in play",
            RejectReason::SideNotChoosable => "serve side is not a free choice",
            RejectReason::NothingToUndo => "nothing to undo",
            RejectReason::NotAwaitingConfirmation => "game not awaiting confirmation",
        };
        f.write_str(text)
    }
}

/// Outbound notification once a game is confirmed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCompleted {
    pub game_id: GameId,
    pub winner: Team,
    pub final_score_a: u32,
    pub final_score_b: u32,
}

/// What an event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// State changed (load, toggle, undo, let).
    Applied,
    /// A rally was recorded. `ended` is set when it decided the game.
    Rally {
        record: RallyRecord,
        transition: Transition,
        ended: Option<GameOutcome>,
    },
    /// Game confirmed over; the engine is now terminal.
    Completed(GameCompleted),
    /// Event ignored; nothing changed.
    Rejected(RejectReason),
}

impl EventOutcome {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, EventOutcome::Rejected(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            EventOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerRow;

    #[test]
    fn test_roster_names() {
        let roster = Roster::new("Ann", "Bo", "Cy", "Di");
        assert_eq!(roster.name(RowKey::new(Team::B, PlayerRow::One)), "Cy");
        assert_eq!(Roster::default().name(RowKey::new(Team::A, PlayerRow::Two)), "");
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_string(&GameEvent::RallyWon { winner: Team::B }).unwrap();
        assert_eq!(json, r#"{"type":"RALLY_WON","winner":"B"}"#);

        let parsed: GameEvent = serde_json::from_str(r#"{"type":"TOGGLE_SERVE_SIDE"}"#).unwrap();
        assert_eq!(parsed, GameEvent::ToggleServeSide);
    }

    #[test]
    fn test_outcome_rejection() {
        let outcome = EventOutcome::Rejected(RejectReason::NothingToUndo);
        assert!(outcome.is_rejected());
        assert_eq!(outcome.rejection(), Some(RejectReason::NothingToUndo));
        assert_eq!(EventOutcome::Applied.rejection(), None);
    }
}
