//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::sync::OnceLock;

use par_doubles::core::{GameConfig, GameId, MatchId, RallyRecord, Team};
use par_doubles::engine::{RallyEngine, Roster};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install a test subscriber once per test binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn game_id() -> GameId {
    GameId::new(MatchId::new(1), 1)
}

/// A loaded engine for `config`.
pub fn engine(config: GameConfig) -> RallyEngine {
    init_logging();
    RallyEngine::loaded(game_id(), config, Roster::default()).unwrap()
}

/// Parse a winner string such as `"AABBA"`.
pub fn winners(sequence: &str) -> Vec<Team> {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_string().parse().unwrap())
        .collect()
}

/// Feed every winner in `sequence` to the engine.
pub fn play(engine: &mut RallyEngine, sequence: &str) {
    for winner in winners(sequence) {
        engine.rally_won(winner);
    }
}

/// The engine's log as a plain vector.
pub fn log_of(engine: &RallyEngine) -> Vec<RallyRecord> {
    engine.log().iter().copied().collect()
}
