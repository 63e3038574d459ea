//! Match configuration.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Team};
use crate::error::ScoringError;

/// Who serves first in games after the first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServeConvention {
    /// Loser of the previous game serves first.
    #[default]
    LoserServesFirst,
    /// Winner of the previous game serves first.
    WinnerServesFirst,
    /// Teams take turns, starting with the game-1 server.
    Alternate,
}

impl ServeConvention {
    /// First serving team for game `game_number` (1-based).
    ///
    /// `opening` serves game 1; `previous_winner` is the winner of game
    /// `game_number - 1`, if there was one.
    #[must_use]
    pub fn first_serving_team(
        self,
        game_number: u8,
        opening: Team,
        previous_winner: Option<Team>,
    ) -> Team {
        let Some(previous_winner) = previous_winner else {
            return opening;
        };
        match self {
            ServeConvention::LoserServesFirst => previous_winner.opponent(),
            ServeConvention::WinnerServesFirst => previous_winner,
            ServeConvention::Alternate => {
                if game_number % 2 == 1 {
                    opening
                } else {
                    opening.opponent()
                }
            }
        }
    }
}

/// Longest match accepted by [`MatchConfig::validate`].
pub const MAX_BEST_OF: u8 = 99;

/// Configuration for a best-of-N match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    /// Maximum games (odd). 5 for a standard match.
    pub best_of: u8,

    /// Template for every game. `first_serving_team` applies to game 1.
    pub game: GameConfig,

    pub serve_convention: ServeConvention,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            best_of: 5,
            game: GameConfig::default(),
            serve_convention: ServeConvention::default(),
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_best_of(mut self, best_of: u8) -> Self {
        self.best_of = best_of;
        self
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    #[must_use]
    pub fn with_serve_convention(mut self, convention: ServeConvention) -> Self {
        self.serve_convention = convention;
        self
    }

    /// Games needed to win the match.
    #[must_use]
    pub fn games_to_win(&self) -> u8 {
        self.best_of / 2 + 1
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.best_of == 0 || self.best_of % 2 == 0 || self.best_of > MAX_BEST_OF {
            return Err(ScoringError::InvalidConfig(format!(
                "best_of must be odd and between 1 and {MAX_BEST_OF}, got {}",
                self.best_of
            )));
        }
        self.game.validate()
    }
}
