//! Match orchestration: best-of-N games of doubles.
//!
//! `MatchOrchestrator` owns at most one live `RallyEngine` and the results
//! of finished games. It decides who serves first in each new game and
//! declares the match once a team has won enough games.

mod config;
mod match_state;

pub use config::{MatchConfig, ServeConvention, MAX_BEST_OF};
pub use match_state::{GameResult, MatchError, MatchOrchestrator};
