//! The live rally engine for one game.
//!
//! States: `NotConfigured -> Active -> AwaitingConfirmation -> Complete`.
//! `Undo` from `AwaitingConfirmation` cancels the game-ending point and
//! returns to `Active`. `Complete` is terminal.
//!
//! Each `RallyWon` pushes a snapshot of the pre-rally state onto the
//! history stack, so `Undo` restores score, server, grid and flags exactly.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::event::{EventOutcome, GameCompleted, GameEvent, RejectReason, Roster};
use crate::core::{
    GameConfig, GameId, GameSnapshot, RallyLog, RallyRecord, RotationState, Score, Server, Team,
};
use crate::error::ScoringError;
use crate::grid::{validate_log, ActivityGrid};
use crate::rules::{resolve_rally, GameOutcome};

/// Lifecycle state of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    NotConfigured,
    Active,
    AwaitingConfirmation,
    Complete,
}

/// Finite-state machine owning one game's live state.
///
/// ## Example
///
/// ```
/// use par_doubles::core::{GameConfig, GameId, MatchId, Team};
/// use par_doubles::engine::{EngineState, RallyEngine, Roster};
///
/// let id = GameId::new(MatchId::new(1), 1);
/// let mut engine = RallyEngine::loaded(id, GameConfig::default(), Roster::default()).unwrap();
///
/// engine.rally_won(Team::A);
/// engine.rally_won(Team::B);
/// assert_eq!(engine.score().a, 1);
/// assert_eq!(engine.score().b, 1);
///
/// engine.undo();
/// assert_eq!(engine.score().b, 0);
/// assert_eq!(engine.state(), EngineState::Active);
/// ```
#[derive(Clone, Debug)]
pub struct RallyEngine {
    game_id: GameId,
    state: EngineState,
    config: GameConfig,
    roster: Roster,
    rotation: RotationState,
    grid: ActivityGrid,
    log: RallyLog,
    history: Vector<GameSnapshot>,
    lets: u32,
}

impl RallyEngine {
    /// An unconfigured engine waiting for `GameLoaded`.
    #[must_use]
    pub fn new(game_id: GameId) -> Self {
        let config = GameConfig::default();
        Self {
            game_id,
            state: EngineState::NotConfigured,
            rotation: RotationState::opening(&config),
            config,
            roster: Roster::default(),
            grid: ActivityGrid::new(),
            log: Vector::new(),
            history: Vector::new(),
            lets: 0,
        }
    }

    /// A configured engine ready for the opening rally.
    ///
    /// Unlike sending `GameLoaded`, a bad configuration is an error here.
    pub fn loaded(
        game_id: GameId,
        config: GameConfig,
        roster: Roster,
    ) -> Result<Self, ScoringError> {
        config.validate()?;
        let mut engine = Self::new(game_id);
        engine.load(config, roster);
        Ok(engine)
    }

    /// Rebuild an engine from a persisted rally log.
    ///
    /// The log is validated first. Recorded side choices at fresh hand-ins
    /// are replayed as toggles, so undo history matches live play.
    pub fn from_log(
        game_id: GameId,
        config: GameConfig,
        roster: Roster,
        log: &[RallyRecord],
    ) -> Result<Self, ScoringError> {
        validate_log(&config, log)?;

        let mut engine = Self::loaded(game_id, config, roster)?;
        for record in log {
            let side_differs = engine.rotation.server.side != record.server_side;
            if engine.rotation.side_choice_open() && side_differs {
                engine.toggle_serve_side();
            }
            engine.rally_won(record.winner);
        }

        debug!(game = %game_id, rallies = log.len(), "engine rebuilt from log");
        Ok(engine)
    }

    // === Events ===

    /// Process one event to completion.
    pub fn send(&mut self, event: GameEvent) -> EventOutcome {
        let outcome = match event {
            GameEvent::GameLoaded { config, roster } => self.on_game_loaded(config, roster),
            GameEvent::RallyWon { winner } => self.on_rally_won(winner),
            GameEvent::ToggleServeSide => self.on_toggle_serve_side(),
            GameEvent::Undo => self.on_undo(),
            GameEvent::Let => self.on_let(),
            GameEvent::ConfirmGameOver => self.on_confirm_game_over(),
        };

        if let EventOutcome::Rejected(reason) = outcome {
            debug!(game = %self.game_id, state = ?self.state, %reason, "event rejected");
        }
        outcome
    }

    /// Send `GameLoaded`.
    pub fn load(&mut self, config: GameConfig, roster: Roster) -> EventOutcome {
        self.send(GameEvent::GameLoaded { config, roster })
    }

    /// Send `RallyWon`.
    pub fn rally_won(&mut self, winner: Team) -> EventOutcome {
        self.send(GameEvent::RallyWon { winner })
    }

    /// Send `ToggleServeSide`.
    pub fn toggle_serve_side(&mut self) -> EventOutcome {
        self.send(GameEvent::ToggleServeSide)
    }

    /// Send `Undo`.
    pub fn undo(&mut self) -> EventOutcome {
        self.send(GameEvent::Undo)
    }

    /// Send `Let`.
    pub fn let_played(&mut self) -> EventOutcome {
        self.send(GameEvent::Let)
    }

    /// Send `ConfirmGameOver`.
    pub fn confirm_game_over(&mut self) -> EventOutcome {
        self.send(GameEvent::ConfirmGameOver)
    }

    fn on_game_loaded(&mut self, config: GameConfig, roster: Roster) -> EventOutcome {
        if self.state != EngineState::NotConfigured {
            return EventOutcome::Rejected(RejectReason::AlreadyConfigured);
        }
        if config.validate().is_err() {
            return EventOutcome::Rejected(RejectReason::InvalidConfig);
        }

        self.rotation = RotationState::opening(&config);
        self.config = config;
        self.roster = roster;
        self.grid = ActivityGrid::new();
        self.log = Vector::new();
        self.history = Vector::new();
        self.lets = 0;
        self.state = EngineState::Active;

        debug!(game = %self.game_id, server = %self.rotation.server, "game loaded");
        EventOutcome::Applied
    }

    fn on_rally_won(&mut self, winner: Team) -> EventOutcome {
        match self.state {
            EngineState::Active => {}
            EngineState::NotConfigured => {
                return EventOutcome::Rejected(RejectReason::NotConfigured)
            }
            _ => return EventOutcome::Rejected(RejectReason::NotInPlay),
        }

        let record = RallyRecord::new(self.log.len() as u32 + 1, self.rotation.server, winner);
        let resolution = resolve_rally(&self.rotation, winner, &self.config.lineup);

        self.history.push_back(GameSnapshot::capture(&self.rotation, &self.grid));
        self.grid.apply_all(&resolution.marks);
        self.rotation = resolution.next;
        self.log.push_back(record);

        debug!(
            game = %self.game_id,
            rally = record.rally_number,
            %winner,
            score_a = self.rotation.score.a,
            score_b = self.rotation.score.b,
            transition = ?resolution.transition,
            next_server = %self.rotation.server,
            "rally recorded"
        );

        let ended = GameOutcome::decide(&self.rotation.score, &self.config);
        if let Some(outcome) = ended {
            self.state = EngineState::AwaitingConfirmation;
            info!(
                game = %self.game_id,
                winner = %outcome.winner,
                score_a = outcome.final_score.a,
                score_b = outcome.final_score.b,
                "game point reached, awaiting confirmation"
            );
        }

        EventOutcome::Rally {
            record,
            transition: resolution.transition,
            ended,
        }
    }

    fn on_toggle_serve_side(&mut self) -> EventOutcome {
        if self.state != EngineState::Active {
            return EventOutcome::Rejected(RejectReason::NotInPlay);
        }
        if !self.rotation.side_choice_open() {
            return EventOutcome::Rejected(RejectReason::SideNotChoosable);
        }

        self.rotation.server.side = self.rotation.server.side.flip();
        EventOutcome::Applied
    }

    fn on_undo(&mut self) -> EventOutcome {
        match self.state {
            EngineState::Active | EngineState::AwaitingConfirmation => {}
            EngineState::NotConfigured => {
                return EventOutcome::Rejected(RejectReason::NotConfigured)
            }
            EngineState::Complete => return EventOutcome::Rejected(RejectReason::NothingToUndo),
        }

        let Some(snapshot) = self.history.pop_back() else {
            return EventOutcome::Rejected(RejectReason::NothingToUndo);
        };

        self.rotation = snapshot.rotation();
        self.grid = snapshot.grid;
        self.log.pop_back();
        self.state = EngineState::Active;

        debug!(
            game = %self.game_id,
            score_a = self.rotation.score.a,
            score_b = self.rotation.score.b,
            server = %self.rotation.server,
            "rally undone"
        );
        EventOutcome::Applied
    }

    fn on_let(&mut self) -> EventOutcome {
        if self.state != EngineState::Active {
            return EventOutcome::Rejected(RejectReason::NotInPlay);
        }
        self.lets += 1;
        EventOutcome::Applied
    }

    fn on_confirm_game_over(&mut self) -> EventOutcome {
        if self.state != EngineState::AwaitingConfirmation {
            return EventOutcome::Rejected(RejectReason::NotAwaitingConfirmation);
        }
        let Some(outcome) = self.outcome() else {
            return EventOutcome::Rejected(RejectReason::NotAwaitingConfirmation);
        };

        self.state = EngineState::Complete;
        let completed = GameCompleted {
            game_id: self.game_id,
            winner: outcome.winner,
            final_score_a: outcome.final_score.a,
            final_score_b: outcome.final_score.b,
        };

        info!(game = %self.game_id, winner = %outcome.winner, "game complete");
        EventOutcome::Completed(completed)
    }

    // === Queries ===

    #[must_use]
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.rotation.score
    }

    /// Who serves next.
    #[must_use]
    pub fn server(&self) -> Server {
        self.rotation.server
    }

    #[must_use]
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    #[must_use]
    pub fn first_hand_used(&self) -> bool {
        self.rotation.first_hand_used
    }

    /// Would `ToggleServeSide` be accepted right now?
    #[must_use]
    pub fn can_toggle_side(&self) -> bool {
        self.state == EngineState::Active && self.rotation.side_choice_open()
    }

    #[must_use]
    pub fn grid(&self) -> &ActivityGrid {
        &self.grid
    }

    /// The append-only rally log.
    #[must_use]
    pub fn log(&self) -> &RallyLog {
        &self.log
    }

    /// Number of undoable rallies.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Lets called this game. Not part of the score.
    #[must_use]
    pub fn lets(&self) -> u32 {
        self.lets
    }

    /// The decided outcome, once the end condition holds.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        GameOutcome::decide(&self.rotation.score, &self.config)
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.rotation, &self.grid)
    }
}
