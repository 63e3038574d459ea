//! Core scoring types: teams, configuration, rally records, rotation state.
//!
//! Everything here is plain data. The rules that move it forward live in
//! `rules`; the live state machine in `engine`.

pub mod team;
pub mod config;
pub mod ids;
pub mod rally;
pub mod state;

pub use team::{HandIndex, PlayerRow, RowKey, Score, Side, Team, TeamMap};
pub use config::{GameConfig, Lineup};
pub use ids::{GameId, MatchId};
pub use rally::{RallyLog, RallyRecord, Server};
pub use state::{GameSnapshot, RotationState};
