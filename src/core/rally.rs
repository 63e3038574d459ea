//! Server identity and the persisted rally record.
//!
//! A `RallyRecord` is the only fact stored about a rally: who was serving,
//! from where, in which hand, and who won. Score, next server and the grid
//! are all derived from the ordered log of these records.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::team::{HandIndex, PlayerRow, RowKey, Side, Team};

/// Who serves the next rally, from which box, in which hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub team: Team,
    pub player: PlayerRow,
    pub side: Side,
    pub hand_index: HandIndex,
}

impl Server {
    /// A server starting a fresh hand-in.
    #[must_use]
    pub const fn hand_in(team: Team, player: PlayerRow, side: Side) -> Self {
        Self {
            team,
            player,
            side,
            hand_index: HandIndex::First,
        }
    }

    /// The server's scoresheet row.
    #[must_use]
    pub const fn row(&self) -> RowKey {
        RowKey::new(self.team, self.player)
    }
}

impl std::fmt::Display for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}/{}", self.team, self.player, self.side)
    }
}

/// One played rally, as persisted.
///
/// Wire shape: `{rallyNumber, winner, serverTeam, serverPlayer, serverSide,
/// serverHandIndex}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RallyRecord {
    /// 1-based position in the game.
    pub rally_number: u32,

    /// Team that won the rally.
    pub winner: Team,

    pub server_team: Team,
    pub server_player: PlayerRow,
    pub server_side: Side,
    pub server_hand_index: HandIndex,
}

impl RallyRecord {
    /// Record a rally served by `server`.
    #[must_use]
    pub const fn new(rally_number: u32, server: Server, winner: Team) -> Self {
        Self {
            rally_number,
            winner,
            server_team: server.team,
            server_player: server.player,
            server_side: server.side,
            server_hand_index: server.hand_index,
        }
    }

    /// The server as it stood before the rally.
    #[must_use]
    pub const fn server(&self) -> Server {
        Server {
            team: self.server_team,
            player: self.server_player,
            side: self.server_side,
            hand_index: self.server_hand_index,
        }
    }

    /// Did the serving team win?
    #[must_use]
    pub fn server_won(&self) -> bool {
        self.winner == self.server_team
    }
}

/// Append-only rally log. Persistent vector for O(1) snapshot cloning.
pub type RallyLog = Vector<RallyRecord>;
