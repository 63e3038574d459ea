//! Game configuration types.
//!
//! A game is configured once, at start:
//! - `GameConfig`: points target, win margin, who serves first
//! - `Lineup`: each team's designated first server for this game
//!
//! Defaults describe a standard PAR-15 doubles game.

use serde::{Deserialize, Serialize};

use super::team::{PlayerRow, Side, Team};
use crate::error::ScoringError;

/// Each team's designated first server.
///
/// The first server takes over whenever their team wins the hand back;
/// the partner only serves after a mid-hand transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lineup {
    pub team_a_first_server: PlayerRow,
    pub team_b_first_server: PlayerRow,
}

impl Lineup {
    #[must_use]
    pub const fn new(team_a_first_server: PlayerRow, team_b_first_server: PlayerRow) -> Self {
        Self {
            team_a_first_server,
            team_b_first_server,
        }
    }

    /// The first server for `team`.
    #[must_use]
    pub const fn first_server(&self, team: Team) -> PlayerRow {
        match team {
            Team::A => self.team_a_first_server,
            Team::B => self.team_b_first_server,
        }
    }
}

impl Default for Lineup {
    fn default() -> Self {
        Self::new(PlayerRow::One, PlayerRow::One)
    }
}

/// Complete configuration for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Points needed to win (15 for PAR-15).
    pub max_points: u32,

    /// Required winning margin (at least 1).
    pub win_by: u32,

    /// Designated first servers.
    #[serde(flatten)]
    pub lineup: Lineup,

    /// Team serving the opening rally.
    pub first_serving_team: Team,

    /// Box for the opening serve. Can still be toggled before rally 1.
    pub first_serve_side: Side,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_points: 15,
            win_by: 2,
            lineup: Lineup::default(),
            first_serving_team: Team::A,
            first_serve_side: Side::R,
        }
    }
}

impl GameConfig {
    /// Create the default PAR-15 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the points target.
    #[must_use]
    pub fn with_max_points(mut self, max_points: u32) -> Self {
        self.max_points = max_points;
        self
    }

    /// Set the winning margin.
    #[must_use]
    pub fn with_win_by(mut self, win_by: u32) -> Self {
        self.win_by = win_by;
        self
    }

    /// Set both teams' first servers.
    #[must_use]
    pub fn with_first_servers(mut self, team_a: PlayerRow, team_b: PlayerRow) -> Self {
        self.lineup = Lineup::new(team_a, team_b);
        self
    }

    /// Set the lineup.
    #[must_use]
    pub fn with_lineup(mut self, lineup: Lineup) -> Self {
        self.lineup = lineup;
        self
    }

    /// Set which team serves first.
    #[must_use]
    pub fn with_first_serving_team(mut self, team: Team) -> Self {
        self.first_serving_team = team;
        self
    }

    /// Set the opening serve side.
    #[must_use]
    pub fn with_first_serve_side(mut self, side: Side) -> Self {
        self.first_serve_side = side;
        self
    }

    /// Check numeric bounds.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.max_points == 0 {
            return Err(ScoringError::InvalidConfig("max_points must be at least 1".into()));
        }
        if self.win_by == 0 {
            return Err(ScoringError::InvalidConfig("win_by must be at least 1".into()));
        }
        Ok(())
    }
}
