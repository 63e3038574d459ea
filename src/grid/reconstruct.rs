//! Grid reconstruction from a rally log.
//!
//! The rally log, not the grid, is the source of truth. Every load, sync
//! merge or snapshot resume rebuilds the grid here by walking the log
//! through the same `resolve_rally` the live engine uses. Replay is a pure
//! function of (starting state, ordered rallies).
//!
//! A serve side chosen at a fresh hand-in is not its own log entry; replay
//! picks it up from the record's `server_side`. Outside that window the side
//! is derived, never read from the record.

use tracing::warn;

use super::activity::ActivityGrid;
use crate::core::{GameConfig, GameSnapshot, Lineup, PlayerRow, RallyRecord, RotationState, Server};
use crate::error::{LogFault, ScoringError};
use crate::rules::{game_ended, resolve_rally, Resolution};

/// Rotation state and grid after replaying some rallies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayState {
    pub rotation: RotationState,
    pub grid: ActivityGrid,
}

impl ReplayState {
    /// Start from a rotation state and a grid.
    #[must_use]
    pub fn new(rotation: RotationState, grid: ActivityGrid) -> Self {
        Self { rotation, grid }
    }

    /// Replay one rally.
    pub fn step(&mut self, record: &RallyRecord, lineup: &Lineup) -> Resolution {
        if self.rotation.side_choice_open() {
            self.rotation.server.side = record.server_side;
        }
        let resolution = resolve_rally(&self.rotation, record.winner, lineup);
        self.grid.apply_all(&resolution.marks);
        self.rotation = resolution.next;
        resolution
    }

    /// Capture as an undo/resume snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.rotation, &self.grid)
    }
}

/// Rebuild the scoresheet from a rally log.
///
/// Starts from an empty grid at 0-0 with `initial_server` about to serve.
/// `first_hand_used_at_start` is false for a game replayed from its first
/// rally.
#[must_use]
pub fn reconstruct_grid(
    log: &[RallyRecord],
    initial_server: Server,
    first_hand_used_at_start: bool,
    team_a_first_server: PlayerRow,
    team_b_first_server: PlayerRow,
) -> ActivityGrid {
    let lineup = Lineup::new(team_a_first_server, team_b_first_server);
    let start = RotationState::starting_from(initial_server, first_hand_used_at_start);
    replay(start, ActivityGrid::new(), log, &lineup).grid
}

/// Replay `tail` on top of a starting state and grid.
#[must_use]
pub fn replay<'a>(
    start: RotationState,
    grid: ActivityGrid,
    tail: impl IntoIterator<Item = &'a RallyRecord>,
    lineup: &Lineup,
) -> ReplayState {
    let mut state = ReplayState::new(start, grid);
    for record in tail {
        state.step(record, lineup);
    }
    state
}

/// Replay a whole game from its opening rally.
#[must_use]
pub fn replay_game(config: &GameConfig, log: &[RallyRecord]) -> ReplayState {
    replay(RotationState::opening(config), ActivityGrid::new(), log, &config.lineup)
}

/// Resume from a persisted snapshot and replay the rallies after it.
#[must_use]
pub fn resume(snapshot: &GameSnapshot, tail: &[RallyRecord], lineup: &Lineup) -> ReplayState {
    replay(snapshot.rotation(), snapshot.grid.clone(), tail, lineup)
}

/// Replay a whole game, checking every record against the rotation.
///
/// Use on logs that arrive from storage or another device. Fails on the
/// first record the rules could not have produced.
pub fn validate_log(config: &GameConfig, log: &[RallyRecord]) -> Result<ReplayState, ScoringError> {
    config.validate()?;

    let mut state = ReplayState::new(RotationState::opening(config), ActivityGrid::new());

    for (i, record) in log.iter().enumerate() {
        let expected = i as u32 + 1;
        let fault = check_record(&state.rotation, record, expected, config);

        if let Some(reason) = fault {
            warn!(
                rally_number = record.rally_number,
                reason = %reason,
                "rejecting rally log"
            );
            return Err(ScoringError::InvalidRallyLog {
                rally_number: record.rally_number,
                reason,
            });
        }

        state.step(record, &config.lineup);
    }

    Ok(state)
}

fn check_record(
    rotation: &RotationState,
    record: &RallyRecord,
    expected: u32,
    config: &GameConfig,
) -> Option<LogFault> {
    let derived = rotation.server;

    if record.rally_number != expected {
        return Some(LogFault::OutOfSequence { expected });
    }
    if game_ended(&rotation.score, config.max_points, config.win_by) {
        return Some(LogFault::AfterGameEnd);
    }
    if record.server_team != derived.team || record.server_player != derived.player {
        return Some(LogFault::WrongServer);
    }
    if record.server_hand_index != derived.hand_index {
        return Some(LogFault::WrongHand);
    }
    if !rotation.side_choice_open() && record.server_side != derived.side {
        return Some(LogFault::WrongSide);
    }
    None
}
