//! Match orchestration tests.

mod common;

use par_doubles::core::{GameConfig, Lineup, MatchId, PlayerRow, Score, Team, TeamMap};
use par_doubles::engine::{EventOutcome, GameEvent, Roster};
use par_doubles::orchestrator::{MatchConfig, MatchError, MatchOrchestrator, ServeConvention};
use par_doubles::sim::{simulate_match, SimConfig};

fn orchestrator(convention: ServeConvention) -> MatchOrchestrator {
    common::init_logging();
    let config = MatchConfig::new()
        .with_game(GameConfig::new().with_max_points(3).with_win_by(1))
        .with_serve_convention(convention);
    MatchOrchestrator::new(MatchId::new(5), config, Roster::default()).unwrap()
}

/// Play one game where `team` wins every rally, and confirm it.
fn sweep(m: &mut MatchOrchestrator, team: Team) -> Team {
    let first_server = m.start_next_game(Lineup::default()).unwrap().server().team;
    for _ in 0..3 {
        m.rally_won(team).unwrap();
    }
    m.confirm_game_over().unwrap();
    first_server
}

// =============================================================================
// Game Sequencing
// =============================================================================

/// Game numbers run 1..N and results accumulate in order.
#[test]
fn test_results_accumulate() {
    let mut m = orchestrator(ServeConvention::LoserServesFirst);
    sweep(&mut m, Team::B);
    sweep(&mut m, Team::A);

    let numbers: Vec<u8> = m.results().iter().map(|r| r.game_number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(m.results()[0].final_score, Score::new(0, 3));
    assert_eq!(m.results()[1].final_score, Score::new(3, 0));
    assert_eq!(m.games_won(), TeamMap::new(1, 1));
}

/// Loser of each game serves first in the next.
#[test]
fn test_loser_serves_first() {
    let mut m = orchestrator(ServeConvention::LoserServesFirst);
    assert_eq!(sweep(&mut m, Team::B), Team::A);
    assert_eq!(sweep(&mut m, Team::B), Team::A);
    assert_eq!(sweep(&mut m, Team::B), Team::A);
    assert!(m.is_complete());
    assert_eq!(m.winner(), Some(Team::B));
}

/// Alternating service ignores who won.
#[test]
fn test_alternate_serves_first() {
    let mut m = orchestrator(ServeConvention::Alternate);
    let firsts: Vec<Team> = [Team::A, Team::A, Team::B, Team::B]
        .into_iter()
        .map(|winner| sweep(&mut m, winner))
        .collect();
    assert_eq!(firsts, vec![Team::A, Team::B, Team::A, Team::B]);
}

/// The per-game lineup picks each team's first server.
#[test]
fn test_lineup_per_game() {
    let mut m = orchestrator(ServeConvention::LoserServesFirst);
    let engine = m.start_next_game(Lineup::new(PlayerRow::Two, PlayerRow::One)).unwrap();
    assert_eq!(engine.server().player, PlayerRow::Two);

    m.rally_won(Team::B).unwrap();
    let server = m.active_game().unwrap().server();
    assert_eq!(server.team, Team::B);
    assert_eq!(server.player, PlayerRow::One);
}

// =============================================================================
// Misuse
// =============================================================================

/// Events need a live game; unconfirmed games block the next one.
#[test]
fn test_misuse_errors() {
    let mut m = orchestrator(ServeConvention::LoserServesFirst);
    assert_eq!(m.send(GameEvent::Undo), Err(MatchError::NoActiveGame));

    m.start_next_game(Lineup::default()).unwrap();
    for event in [GameEvent::RallyWon { winner: Team::A }, GameEvent::Let] {
        m.send(event).unwrap();
    }
    m.rally_won(Team::A).unwrap();
    m.rally_won(Team::A).unwrap();
    assert!(m.awaiting_confirmation());
    assert!(matches!(
        m.start_next_game(Lineup::default()),
        Err(MatchError::GameInProgress(_))
    ));

    let outcome = m.confirm_game_over().unwrap();
    let EventOutcome::Completed(completed) = outcome else {
        panic!("expected completion");
    };
    assert_eq!(completed.game_id.match_id, MatchId::new(5));
    assert!(m.active_game().is_none());
}

/// Rejected engine events pass through without touching match state.
#[test]
fn test_rejections_pass_through() {
    let mut m = orchestrator(ServeConvention::LoserServesFirst);
    m.start_next_game(Lineup::default()).unwrap();

    let outcome = m.confirm_game_over().unwrap();
    assert!(outcome.is_rejected());
    assert!(m.results().is_empty());
    assert!(m.active_game().is_some());
}

/// Every confirmed game is recorded and frees the slot for the next one.
#[test]
fn test_each_confirmed_game_starts_the_next() {
    let config =
        MatchConfig::new().with_game(GameConfig::new().with_max_points(1).with_win_by(1));
    let mut m = MatchOrchestrator::new(MatchId::new(1), config, Roster::default()).unwrap();

    for (game, winner) in [Team::A, Team::B, Team::A].into_iter().enumerate() {
        let engine = m.start_next_game(Lineup::default()).unwrap();
        assert_eq!(usize::from(engine.game_id().number), game + 1);

        m.rally_won(winner).unwrap();
        assert!(m.awaiting_confirmation());
        assert!(matches!(m.confirm_game_over().unwrap(), EventOutcome::Completed(_)));

        assert_eq!(m.results().len(), game + 1);
        assert!(m.active_game().is_none());
    }
    assert_eq!(m.games_won(), TeamMap::new(2, 1));
    assert!(!m.is_complete());
}

/// A finished match refuses further games.
#[test]
fn test_match_complete_error() {
    let config = MatchConfig::new()
        .with_best_of(1)
        .with_game(GameConfig::new().with_max_points(1).with_win_by(1));
    let mut m = MatchOrchestrator::new(MatchId::new(1), config, Roster::default()).unwrap();

    m.start_next_game(Lineup::default()).unwrap();
    m.rally_won(Team::A).unwrap();
    m.confirm_game_over().unwrap();

    let err = m.start_next_game(Lineup::default()).err().unwrap();
    assert_eq!(err, MatchError::MatchComplete(Team::A));
    assert_eq!(err.to_string(), "match already won by team A");
}

// =============================================================================
// Simulated Matches
// =============================================================================

/// Simulated matches are reproducible from their seed.
#[test]
fn test_simulated_match_is_deterministic() {
    common::init_logging();
    let run = |seed| {
        simulate_match(MatchId::new(8), MatchConfig::default(), &SimConfig::default(), seed)
            .unwrap()
            .results()
            .to_vec()
    };

    assert_eq!(run(17), run(17));
    let results = run(17);
    assert!(results.len() >= 3 && results.len() <= 5);
    for result in &results {
        assert!(result.final_score[result.winner] >= 15);
    }
}
