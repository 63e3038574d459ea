//! Rally resolution: the doubles serve-rotation rules.
//!
//! `resolve_rally` is the single transition function of the system. The live
//! engine and the grid reconstructor both call it, so an incrementally built
//! scoresheet and one replayed from the log cannot drift apart.
//!
//! ## Rules
//!
//! - Every rally scores a point for its winner.
//! - Server's team wins: same server continues from the other box.
//! - Receivers win the opening rally of the game: immediate side-out. The
//!   opening server's partner never serves this hand and is marked `/`.
//! - Receivers win against a first-hand server: the partner serves next from
//!   the box opposite the outgoing server's last serve. The receiving team
//!   gets an `X` marker at their own pre-point score.
//! - Receivers win against the second-hand server: side-out. The receiving
//!   team's designated first server takes over from the right box.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{HandIndex, Lineup, RotationState, RowKey, Server, Side, Team};
use crate::grid::Cell;

/// Where a mark lands on the scoresheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkTarget {
    /// A player's row.
    Player(RowKey),
    /// A team's merged row (carries `X` markers only).
    Team(Team),
}

/// One cell written by a rally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mark {
    pub target: MarkTarget,
    pub column: u32,
    pub cell: Cell,
}

impl Mark {
    #[must_use]
    pub const fn player(row: RowKey, column: u32, cell: Cell) -> Self {
        Self {
            target: MarkTarget::Player(row),
            column,
            cell,
        }
    }

    #[must_use]
    pub const fn team(team: Team, column: u32, cell: Cell) -> Self {
        Self {
            target: MarkTarget::Team(team),
            column,
            cell,
        }
    }
}

/// What kind of hand transition a rally caused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    /// Serving team won; same server continues.
    Held,
    /// Opening rally lost; serve passes straight to the other team.
    OpeningSideOut,
    /// First-hand server lost; partner takes over.
    PartnerHandIn,
    /// Second-hand server lost; serve passes to the other team.
    SideOut,
}

impl Transition {
    /// Did serve pass to the other team?
    #[must_use]
    pub const fn is_side_out(self) -> bool {
        matches!(self, Transition::OpeningSideOut | Transition::SideOut)
    }
}

/// Result of resolving one rally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// State for the next rally.
    pub next: RotationState,
    /// Cells to write; at most three per rally.
    pub marks: SmallVec<[Mark; 3]>,
    pub transition: Transition,
}

/// Resolve a rally won by `winner` from `state`.
///
/// Pure and total: any reachable state and either winner produce a legal
/// successor state.
#[must_use]
pub fn resolve_rally(state: &RotationState, winner: Team, lineup: &Lineup) -> Resolution {
    let server = state.server;
    let serving = server.team;
    let receiving = serving.opponent();
    let column = state.score[serving];

    let mut next = *state;
    next.score[winner] += 1;
    next.first_hand_used = true;
    next.fresh_hand = false;

    let mut marks = SmallVec::new();

    if winner == serving {
        marks.push(Mark::player(server.row(), column, Cell::served(server.side)));
        next.server.side = server.side.flip();
        return Resolution {
            next,
            marks,
            transition: Transition::Held,
        };
    }

    marks.push(Mark::player(server.row(), column, Cell::lost(server.side)));

    let transition = if !state.first_hand_used {
        marks.push(Mark::player(server.row().partner(), column, Cell::Slash));
        next.server = take_over(receiving, lineup);
        next.fresh_hand = true;
        Transition::OpeningSideOut
    } else {
        match server.hand_index {
            HandIndex::First => {
                marks.push(Mark::team(receiving, state.score[receiving], Cell::X));
                next.server = Server {
                    team: serving,
                    player: server.player.partner(),
                    side: server.side.flip(),
                    hand_index: HandIndex::Second,
                };
                Transition::PartnerHandIn
            }
            HandIndex::Second => {
                next.server = take_over(receiving, lineup);
                next.fresh_hand = true;
                Transition::SideOut
            }
        }
    };

    Resolution {
        next,
        marks,
        transition,
    }
}

/// A team winning the serve back starts with its first server in the right box.
fn take_over(team: Team, lineup: &Lineup) -> Server {
    Server::hand_in(team, lineup.first_server(team), Side::R)
}
