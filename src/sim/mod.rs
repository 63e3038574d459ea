//! Deterministic simulated play.
//!
//! Drives real engines with random rally winners so tests and benchmarks
//! can exercise long games without hand-written fixtures.

mod rng;

pub use rng::RallyRng;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{GameConfig, GameId, Lineup, MatchId};
use crate::engine::{EngineState, GameEvent, RallyEngine, Roster};
use crate::error::ScoringError;
use crate::orchestrator::{MatchConfig, MatchError, MatchOrchestrator};

/// How simulated rallies are decided.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Chance the serving team wins a rally.
    pub server_win_probability: f64,

    /// Chance a fresh hand-in switches box before serving.
    pub toggle_probability: f64,

    /// Chance a rally is a let first (replayed, not scored).
    pub let_probability: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            server_win_probability: 0.5,
            toggle_probability: 0.25,
            let_probability: 0.0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let probabilities = [
            ("server_win_probability", self.server_win_probability),
            ("toggle_probability", self.toggle_probability),
            ("let_probability", self.let_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ScoringError::InvalidConfig(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        // A let-only stream would never finish a game.
        if self.let_probability >= 1.0 {
            return Err(ScoringError::InvalidConfig("let_probability must be below 1".into()));
        }
        Ok(())
    }
}

/// Events for the next simulated rally: an optional side toggle, then a
/// let or a decided rally.
fn next_events(
    engine: &RallyEngine,
    sim: &SimConfig,
    rng: &mut RallyRng,
) -> SmallVec<[GameEvent; 2]> {
    let mut events = SmallVec::new();
    if engine.can_toggle_side() && rng.gen_bool(sim.toggle_probability) {
        events.push(GameEvent::ToggleServeSide);
    }
    if rng.gen_bool(sim.let_probability) {
        events.push(GameEvent::Let);
    } else {
        let winner = rng.rally_winner(engine.server().team, sim.server_win_probability);
        events.push(GameEvent::RallyWon { winner });
    }
    events
}

/// Simulate one game to its deciding point.
///
/// The returned engine is `AwaitingConfirmation`; its log and grid are the
/// complete game.
pub fn simulate_game(
    game_id: GameId,
    config: GameConfig,
    sim: &SimConfig,
    rng: &mut RallyRng,
) -> Result<RallyEngine, ScoringError> {
    sim.validate()?;
    let mut engine = RallyEngine::loaded(game_id, config, Roster::default())?;
    while engine.state() == EngineState::Active {
        for event in next_events(&engine, sim, rng) {
            engine.send(event);
        }
    }

    debug!(
        game = %game_id,
        rallies = engine.log().len(),
        score_a = engine.score().a,
        score_b = engine.score().b,
        "simulated game"
    );
    Ok(engine)
}

/// Simulate a whole match. Each game gets its own forked stream and a
/// random lineup.
pub fn simulate_match(
    match_id: MatchId,
    config: MatchConfig,
    sim: &SimConfig,
    seed: u64,
) -> Result<MatchOrchestrator, MatchError> {
    sim.validate()?;
    let mut orchestrator = MatchOrchestrator::new(match_id, config, Roster::default())?;
    let mut rng = RallyRng::new(seed);

    while !orchestrator.is_complete() {
        let mut game_rng = rng.fork();
        let lineup = Lineup::new(game_rng.player_row(), game_rng.player_row());

        orchestrator.start_next_game(lineup)?;
        while let Some(engine) = orchestrator.active_game() {
            if engine.state() != EngineState::Active {
                break;
            }
            for event in next_events(engine, sim, &mut game_rng) {
                orchestrator.send(event)?;
            }
        }
        orchestrator.confirm_game_over()?;
    }
    Ok(orchestrator)
}
