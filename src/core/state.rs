//! Rotation state and undo snapshots.
//!
//! ## RotationState
//!
//! Everything the rally rules need to resolve the next rally:
//! - Score
//! - Current server (team, row, side, hand)
//! - Whether the opening rally has been played (`first_hand_used`)
//! - Whether the current hand-in has not served yet (`fresh_hand`)
//!
//! ## GameSnapshot
//!
//! A point-in-time copy of rotation state plus the grid. The engine keeps a
//! stack of these for undo; a persisted snapshot plus a rally tail is enough
//! to resume replay.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::rally::Server;
use super::team::{HandIndex, Score};
use crate::grid::ActivityGrid;

/// The rotation-relevant part of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
    pub score: Score,
    pub server: Server,

    /// Set once the opening rally has been played.
    pub first_hand_used: bool,

    /// True from a hand-in until its first serve. Only then is the serve
    /// side a free choice.
    pub fresh_hand: bool,
}

impl RotationState {
    /// State before the opening rally of a game.
    #[must_use]
    pub fn opening(config: &GameConfig) -> Self {
        let team = config.first_serving_team;
        Self {
            score: Score::default(),
            server: Server::hand_in(
                team,
                config.lineup.first_server(team),
                config.first_serve_side,
            ),
            first_hand_used: false,
            fresh_hand: true,
        }
    }

    /// State at the start of replay from an explicit initial server.
    ///
    /// `first_hand_used` lets a caller resume mid-game; a server already in
    /// its second hand is never at a fresh hand-in.
    #[must_use]
    pub fn starting_from(server: Server, first_hand_used: bool) -> Self {
        Self {
            score: Score::default(),
            server,
            first_hand_used,
            fresh_hand: server.hand_index == HandIndex::First,
        }
    }

    /// Can the current server still choose their box?
    #[must_use]
    pub fn side_choice_open(&self) -> bool {
        self.fresh_hand && self.server.hand_index == HandIndex::First
    }
}

/// Full point-in-time copy of a game, pushed once per scored rally.
///
/// Cloning is cheap: grid rows are persistent vectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub score: Score,
    pub server: Server,
    pub grid: ActivityGrid,
    pub first_hand_used: bool,
    pub fresh_hand: bool,
}

impl GameSnapshot {
    /// Capture rotation state and grid.
    #[must_use]
    pub fn capture(rotation: &RotationState, grid: &ActivityGrid) -> Self {
        Self {
            score: rotation.score,
            server: rotation.server,
            grid: grid.clone(),
            first_hand_used: rotation.first_hand_used,
            fresh_hand: rotation.fresh_hand,
        }
    }

    /// The rotation part of the snapshot.
    #[must_use]
    pub fn rotation(&self) -> RotationState {
        RotationState {
            score: self.score,
            server: self.server,
            first_hand_used: self.first_hand_used,
            fresh_hand: self.fresh_hand,
        }
    }
}
