//! Match orchestrator: sequences games and tallies results.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::config::MatchConfig;
use crate::core::{GameId, Lineup, MatchId, Score, Team, TeamMap};
use crate::engine::{EngineState, EventOutcome, GameCompleted, GameEvent, RallyEngine, Roster};
use crate::error::ScoringError;

/// Orchestrator misuse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("game {0} is still in progress")]
    GameInProgress(GameId),

    #[error("no game in progress")]
    NoActiveGame,

    #[error("match already won by team {0}")]
    MatchComplete(Team),

    #[error(transparent)]
    InvalidConfig(#[from] ScoringError),
}

/// A finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub game_number: u8,
    pub winner: Team,
    pub final_score: Score,
}

impl GameResult {
    fn from_completed(completed: &GameCompleted) -> Self {
        Self {
            game_number: completed.game_id.number,
            winner: completed.winner,
            final_score: Score::new(completed.final_score_a, completed.final_score_b),
        }
    }
}

/// Owns the live game (if any) and the results of finished games.
///
/// ## Example
///
/// ```
/// use par_doubles::core::{GameConfig, Lineup, MatchId, Team};
/// use par_doubles::engine::Roster;
/// use par_doubles::orchestrator::{MatchConfig, MatchOrchestrator};
///
/// let config = MatchConfig::new()
///     .with_best_of(1)
///     .with_game(GameConfig::new().with_max_points(2).with_win_by(1));
/// let mut m = MatchOrchestrator::new(MatchId::new(9), config, Roster::default()).unwrap();
///
/// m.start_next_game(Lineup::default()).unwrap();
/// m.rally_won(Team::B).unwrap();
/// m.rally_won(Team::B).unwrap();
/// m.confirm_game_over().unwrap();
///
/// assert_eq!(m.winner(), Some(Team::B));
/// ```
#[derive(Clone, Debug)]
pub struct MatchOrchestrator {
    match_id: MatchId,
    config: MatchConfig,
    roster: Roster,
    active: Option<RallyEngine>,
    results: Vec<GameResult>,
}

impl MatchOrchestrator {
    /// Create a match with no games played.
    pub fn new(match_id: MatchId, config: MatchConfig, roster: Roster) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            match_id,
            config,
            roster,
            active: None,
            results: Vec::new(),
        })
    }

    /// Spawn the engine for the next game.
    ///
    /// The serving team comes from the match's serve convention; each team's
    /// first server comes from `lineup`. The engine stays owned by the
    /// orchestrator: drive it through [`send`](Self::send), so a confirmed
    /// game is always recorded.
    ///
    /// ```compile_fail
    /// use par_doubles::core::{Lineup, MatchId};
    /// use par_doubles::engine::Roster;
    /// use par_doubles::orchestrator::{MatchConfig, MatchOrchestrator};
    ///
    /// let config = MatchConfig::new();
    /// let mut m = MatchOrchestrator::new(MatchId::new(1), config, Roster::default()).unwrap();
    /// let engine = m.start_next_game(Lineup::default()).unwrap();
    /// engine.confirm_game_over();
    /// ```
    pub fn start_next_game(&mut self, lineup: Lineup) -> Result<&RallyEngine, MatchError> {
        if let Some(winner) = self.winner() {
            return Err(MatchError::MatchComplete(winner));
        }
        if let Some(engine) = &self.active {
            return Err(MatchError::GameInProgress(engine.game_id()));
        }

        let game_number = self.next_game_number();
        let config = self
            .config
            .game
            .with_lineup(lineup)
            .with_first_serving_team(self.next_first_serving_team());
        let game_id = GameId::new(self.match_id, game_number);

        let engine = RallyEngine::loaded(game_id, config, self.roster.clone())?;
        info!(
            game = %game_id,
            first_serving_team = %config.first_serving_team,
            "game started"
        );

        Ok(&*self.active.insert(engine))
    }

    /// Forward an event to the live game.
    ///
    /// A confirmed game end is recorded and the engine released.
    pub fn send(&mut self, event: GameEvent) -> Result<EventOutcome, MatchError> {
        let engine = self.active.as_mut().ok_or(MatchError::NoActiveGame)?;
        let outcome = engine.send(event);

        if let EventOutcome::Completed(completed) = &outcome {
            self.record(completed);
        }
        Ok(outcome)
    }

    pub fn rally_won(&mut self, winner: Team) -> Result<EventOutcome, MatchError> {
        self.send(GameEvent::RallyWon { winner })
    }

    pub fn undo(&mut self) -> Result<EventOutcome, MatchError> {
        self.send(GameEvent::Undo)
    }

    pub fn confirm_game_over(&mut self) -> Result<EventOutcome, MatchError> {
        self.send(GameEvent::ConfirmGameOver)
    }

    fn record(&mut self, completed: &GameCompleted) {
        self.results.push(GameResult::from_completed(completed));
        self.active = None;

        let games = self.games_won();
        info!(
            match_id = %self.match_id,
            game = completed.game_id.number,
            winner = %completed.winner,
            games_a = games.a,
            games_b = games.b,
            "game recorded"
        );

        if let Some(winner) = self.winner() {
            info!(match_id = %self.match_id, %winner, "match complete");
        }
    }

    // === Queries ===

    #[must_use]
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The live game, if one is in progress.
    #[must_use]
    pub fn active_game(&self) -> Option<&RallyEngine> {
        self.active.as_ref()
    }

    /// Is the live game waiting for confirmation of its final point?
    #[must_use]
    pub fn awaiting_confirmation(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|e| e.state() == EngineState::AwaitingConfirmation)
    }

    /// Finished games, in order.
    #[must_use]
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Games won per team.
    #[must_use]
    pub fn games_won(&self) -> TeamMap<u8> {
        let mut games = TeamMap::default();
        for result in &self.results {
            games[result.winner] += 1;
        }
        games
    }

    /// Match winner, once a team reaches the required games.
    #[must_use]
    pub fn winner(&self) -> Option<Team> {
        let games = self.games_won();
        let needed = self.config.games_to_win();
        Team::ALL.into_iter().find(|&team| games[team] >= needed)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.winner().is_some()
    }

    /// Number the next game will get.
    #[must_use]
    pub fn next_game_number(&self) -> u8 {
        u8::try_from(self.results.len()).map_or(u8::MAX, |played| played.saturating_add(1))
    }

    /// Team that will serve first in the next game.
    #[must_use]
    pub fn next_first_serving_team(&self) -> Team {
        self.config.serve_convention.first_serving_team(
            self.next_game_number(),
            self.config.game.first_serving_team,
            self.results.last().map(|r| r.winner),
        )
    }
}
