//! Game termination.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Score, Team};

/// Has a game with this score been decided?
///
/// True iff the leader has reached `max_points` and leads by at least
/// `win_by`.
#[must_use]
pub fn game_ended(score: &Score, max_points: u32, win_by: u32) -> bool {
    score.a.max(score.b) >= max_points && score.margin() >= win_by
}

/// Result of a decided game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub winner: Team,
    pub final_score: Score,
}

impl GameOutcome {
    /// The decided outcome for `score`, or `None` while the game continues.
    #[must_use]
    pub fn decide(score: &Score, config: &GameConfig) -> Option<Self> {
        if !game_ended(score, config.max_points, config.win_by) {
            return None;
        }
        score.leader().map(|winner| Self {
            winner,
            final_score: *score,
        })
    }

    /// Check if a team won.
    #[must_use]
    pub fn is_winner(&self, team: Team) -> bool {
        self.winner == team
    }
}
