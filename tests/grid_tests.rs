//! Scoresheet reconstruction tests.
//!
//! Logs are built by walking the rotation rules directly, then replayed
//! through the pure reconstructor.

mod common;

use common::winners;
use par_doubles::core::{
    GameConfig, HandIndex, Lineup, PlayerRow, RallyRecord, RotationState, RowKey, Server, Side,
    Team,
};
use par_doubles::grid::{reconstruct_grid, replay_game, resume, validate_log, ActivityGrid, Cell};
use par_doubles::rules::resolve_rally;

const A1: RowKey = RowKey::new(Team::A, PlayerRow::One);
const A2: RowKey = RowKey::new(Team::A, PlayerRow::Two);
const B1: RowKey = RowKey::new(Team::B, PlayerRow::One);
const B2: RowKey = RowKey::new(Team::B, PlayerRow::Two);

fn build_log(start: RotationState, lineup: &Lineup, sequence: &str) -> Vec<RallyRecord> {
    let mut state = start;
    winners(sequence)
        .into_iter()
        .enumerate()
        .map(|(i, winner)| {
            let record = RallyRecord::new(i as u32 + 1, state.server, winner);
            state = resolve_rally(&state, winner, lineup).next;
            record
        })
        .collect()
}

fn a1_opening() -> Server {
    Server::hand_in(Team::A, PlayerRow::One, Side::R)
}

fn grid_for(lineup: Lineup, sequence: &str) -> ActivityGrid {
    let start = RotationState::starting_from(a1_opening(), false);
    let log = build_log(start, &lineup, sequence);
    reconstruct_grid(
        &log,
        a1_opening(),
        false,
        lineup.team_a_first_server,
        lineup.team_b_first_server,
    )
}

// =============================================================================
// Fixture Scenarios
// =============================================================================

/// An empty log leaves every row empty.
#[test]
fn test_zero_rallies() {
    let grid = reconstruct_grid(&[], a1_opening(), false, PlayerRow::One, PlayerRow::One);
    assert!(grid.is_blank());
    assert_eq!(grid.width(), 0);
}

/// Losing the opening rally hands straight over to B's first server.
#[test]
fn test_opening_exception_routes_to_b2() {
    let lineup = Lineup::new(PlayerRow::One, PlayerRow::Two);
    let grid = grid_for(lineup, "BB");

    assert_eq!(grid.cell(A1, 0), Cell::RSlash);
    assert_eq!(grid.cell(A2, 0), Cell::Slash);
    assert_eq!(grid.cell(B2, 1), Cell::R);
    assert_eq!(grid.cell(B1, 1), Cell::Empty);
    assert!(grid.team_row(Team::A).iter().all(|c| c.is_empty()));
    assert!(grid.team_row(Team::B).iter().all(|c| c.is_empty()));
}

/// A dominant server alternates R/L with no hand transitions.
#[test]
fn test_dominant_server_run() {
    let grid = grid_for(Lineup::default(), "AAAAAAAAAAAA");

    assert_eq!(
        grid.row_marks(A1),
        vec!["R", "L", "R", "L", "R", "L", "R", "L", "R", "L", "R", "L"]
    );
    assert!(grid.row(A2).is_empty());
    assert!(grid.row(B1).is_empty());
    assert!(grid.row(B2).is_empty());
}

/// A first-hand loss after the opening puts an X on the receivers' row.
#[test]
fn test_mid_hand_loss_marks_receivers() {
    // Opening loss gives B1 the serve at B=1; B1 then loses their first hand.
    let grid = grid_for(Lineup::default(), "BA");

    assert_eq!(grid.cell(B1, 1), Cell::RSlash);
    assert_eq!(grid.team_cell(Team::A, 0), Cell::X);
    assert!(grid.team_row(Team::B).iter().all(|c| c.is_empty()));
}

/// The partner serves next from the box opposite the outgoing server's last.
#[test]
fn test_partner_serves_from_opposite_box() {
    let lineup = Lineup::default();
    let start = RotationState::starting_from(a1_opening(), false);
    let log = build_log(start, &lineup, "BAA");

    // Rally 3 was served by B2 as second hand from L.
    let third = log[2].server();
    assert_eq!(third.row(), B2);
    assert_eq!(third.side, Side::L);
    assert_eq!(third.hand_index, HandIndex::Second);

    let grid = grid_for(lineup, "BAA");
    assert_eq!(grid.cell(B2, 1), Cell::LSlash);
}

/// Every lineup routes opening and second-hand side-outs to the right player.
#[test]
fn test_all_lineup_permutations() {
    for a_first in [PlayerRow::One, PlayerRow::Two] {
        for b_first in [PlayerRow::One, PlayerRow::Two] {
            let lineup = Lineup::new(a_first, b_first);
            let a_server = RowKey::new(Team::A, a_first);
            let b_server = RowKey::new(Team::B, b_first);

            let opening = Server::hand_in(Team::A, a_first, Side::R);
            let start = RotationState::starting_from(opening, false);
            let log = build_log(start, &lineup, "BAAA");
            let grid = reconstruct_grid(&log, opening, false, a_first, b_first);

            assert_eq!(grid.cell(a_server, 0), Cell::RSlash, "{lineup:?}");
            assert_eq!(grid.cell(a_server.partner(), 0), Cell::Slash, "{lineup:?}");
            assert_eq!(grid.cell(b_server, 1), Cell::RSlash, "{lineup:?}");
            assert_eq!(grid.team_cell(Team::A, 0), Cell::X, "{lineup:?}");
            assert_eq!(grid.cell(b_server.partner(), 1), Cell::LSlash, "{lineup:?}");
            assert_eq!(grid.cell(a_server, 2), Cell::R, "{lineup:?}");
            assert_eq!(log[3].server_team, Team::A);
            assert_eq!(log[3].server_player, a_first);
        }
    }
}

/// The opening exception fires at most once, however the game continues.
#[test]
fn test_opening_exception_never_recurs() {
    let sequence = "ABABBABAABBBAABABABBAB";
    let grid = grid_for(Lineup::default(), sequence);

    let slashes: usize = [A1, A2, B1, B2]
        .iter()
        .map(|&key| grid.row(key).iter().filter(|&&c| c == Cell::Slash).count())
        .sum();
    assert_eq!(slashes, 0);

    let grid = grid_for(Lineup::default(), &format!("B{sequence}"));
    let slashes: usize = [A1, A2, B1, B2]
        .iter()
        .map(|&key| grid.row(key).iter().filter(|&&c| c == Cell::Slash).count())
        .sum();
    assert_eq!(slashes, 1);
}

// =============================================================================
// Replay Entry Points
// =============================================================================

/// Reconstruction is a pure function of its inputs.
#[test]
fn test_reconstruction_is_idempotent() {
    let lineup = Lineup::new(PlayerRow::Two, PlayerRow::One);
    let first = grid_for(lineup, "AABABBBAABAB");
    let second = grid_for(lineup, "AABABBBAABAB");
    assert_eq!(first, second);
}

/// Resuming from a mid-game snapshot equals replaying the full log.
#[test]
fn test_resume_matches_full_replay() {
    let config = GameConfig::default();
    let log = build_log(RotationState::opening(&config), &config.lineup, "ABBABAAABBABABBA");

    let full = replay_game(&config, &log);
    let head = replay_game(&config, &log[..7]);
    let resumed = resume(&head.snapshot(), &log[7..], &config.lineup);

    assert_eq!(resumed, full);
}

/// A side chosen at a fresh hand-in is read back from the record.
#[test]
fn test_replay_adopts_chosen_side() {
    let config = GameConfig::default();
    let mut log = build_log(RotationState::opening(&config), &config.lineup, "BBB");
    // B1 chose the left box at hand-in; later serves alternate from there.
    log[1].server_side = Side::L;
    log[2].server_side = Side::R;

    let state = replay_game(&config, &log);
    assert_eq!(state.grid.row_marks(B1), vec!["", "L", "R"]);
    assert!(validate_log(&config, &log).is_ok());
}

/// Replay from a mid-hand starting server skips the opening exception.
#[test]
fn test_second_hand_start() {
    let server = Server {
        team: Team::B,
        player: PlayerRow::Two,
        side: Side::L,
        hand_index: HandIndex::Second,
    };
    let start = RotationState::starting_from(server, true);
    let log = build_log(start, &Lineup::default(), "A");

    let grid = reconstruct_grid(&log, server, true, PlayerRow::One, PlayerRow::One);
    assert_eq!(grid.cell(B2, 0), Cell::LSlash);
    assert!(grid.team_row(Team::A).is_empty());
    assert!(grid.row(A2).is_empty());
}

/// The text scoresheet lists every row under a column header.
#[test]
fn test_text_scoresheet() {
    let grid = grid_for(Lineup::default(), "BA");
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "    0  1");
    assert_eq!(lines[1], "A1  R/");
    assert_eq!(lines[2], "A2  /");
    assert_eq!(lines[3], "A   X");
    assert_eq!(lines[4], "B1     R/");
}
