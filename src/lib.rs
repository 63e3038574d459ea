//! # par-doubles
//!
//! Scoring engine for PAR-15 doubles squash.
//!
//! ## Design Principles
//!
//! 1. **The log is the truth**: A game is its ordered list of `RallyRecord`s.
//!    Score, server and the scoresheet grid are all derived from it.
//!
//! 2. **One transition function**: `rules::resolve_rally` moves the rotation
//!    forward. The live engine and the pure grid reconstructor both call it,
//!    so they cannot disagree.
//!
//! 3. **Events never fail**: An event that does not fit the engine's state is
//!    rejected as a value and changes nothing. Only bad input data (configs,
//!    logs, blobs) produces `ScoringError`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Grid rows, the rally log and the undo
//!   history use `im` vectors, so a snapshot per rally costs O(1).
//!
//! - **Structured logging**: Transitions are reported through `tracing`. The
//!   library never installs a subscriber.
//!
//! ## Modules
//!
//! - `core`: Teams, rows, sides, configuration, rally records, rotation state
//! - `rules`: Rally resolution and game-end detection
//! - `grid`: Scoresheet cells, the activity grid, log replay and validation
//! - `engine`: `RallyEngine`, the live state machine for one game
//! - `orchestrator`: `MatchOrchestrator`, best-of-N sequencing
//! - `codec`: Binary encoding of logs and snapshots
//! - `sim`: Seeded simulated play for tests and benchmarks

pub mod core;
pub mod error;
pub mod rules;
pub mod grid;
pub mod engine;
pub mod orchestrator;
pub mod codec;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, Lineup, GameId, MatchId,
    Team, PlayerRow, Side, HandIndex, RowKey, TeamMap, Score,
    Server, RallyRecord, RallyLog,
    RotationState, GameSnapshot,
};

pub use crate::error::{LogFault, ScoringError};

pub use crate::rules::{
    resolve_rally, game_ended,
    GameOutcome, Mark, MarkTarget, Resolution, Transition,
};

pub use crate::grid::{
    Cell, ActivityGrid, ReplayState,
    reconstruct_grid, replay, replay_game, resume, validate_log,
};

pub use crate::engine::{
    RallyEngine, EngineState,
    GameEvent, EventOutcome, RejectReason, GameCompleted, Roster,
};

pub use crate::orchestrator::{
    MatchOrchestrator, MatchConfig, ServeConvention, GameResult, MatchError,
};

pub use crate::sim::{RallyRng, SimConfig, simulate_game, simulate_match};
