//! Teams, player rows, serve sides and per-team storage.
//!
//! ## Team / PlayerRow / Side
//!
//! Small `Copy` enums with the flip helpers the rotation rules lean on:
//! `Team::opponent`, `PlayerRow::partner`, `Side::flip`.
//!
//! ## TeamMap
//!
//! Fixed two-slot storage indexed by `Team`. `Score` is a `TeamMap<u32>`.
//!
//! Parsing from strings is strict: an unknown letter or digit is a caller
//! bug and comes back as a [`ScoringError`], never a silent default.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ScoringError;

/// One of the two doubles teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Both teams, A first.
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Slot index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

impl FromStr for Team {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "a" => Ok(Team::A),
            "B" | "b" => Ok(Team::B),
            other => Err(ScoringError::InvalidTeam(other.to_string())),
        }
    }
}

/// A player's position within their team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PlayerRow {
    One,
    Two,
}

impl PlayerRow {
    /// Both rows, 1 first.
    pub const ALL: [PlayerRow; 2] = [PlayerRow::One, PlayerRow::Two];

    /// The teammate's row.
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            PlayerRow::One => PlayerRow::Two,
            PlayerRow::Two => PlayerRow::One,
        }
    }

    /// The row number as written on a scoresheet (1 or 2).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            PlayerRow::One => 1,
            PlayerRow::Two => 2,
        }
    }
}

impl From<PlayerRow> for u8 {
    fn from(row: PlayerRow) -> Self {
        row.number()
    }
}

impl TryFrom<u8> for PlayerRow {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlayerRow::One),
            2 => Ok(PlayerRow::Two),
            other => Err(ScoringError::InvalidPlayerRow(other.to_string())),
        }
    }
}

impl FromStr for PlayerRow {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(PlayerRow::One),
            "2" => Ok(PlayerRow::Two),
            other => Err(ScoringError::InvalidPlayerRow(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlayerRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Service box: right or left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    R,
    L,
}

impl Side {
    /// The other box.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Side::R => Side::L,
            Side::L => Side::R,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::R => write!(f, "R"),
            Side::L => write!(f, "L"),
        }
    }
}

impl FromStr for Side {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" | "r" => Ok(Side::R),
            "L" | "l" => Ok(Side::L),
            other => Err(ScoringError::InvalidSide(other.to_string())),
        }
    }
}

/// Which server of the current hand-in is serving.
///
/// Serialized as `0` (first server) or `1` (partner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HandIndex {
    #[default]
    First,
    Second,
}

impl From<HandIndex> for u8 {
    fn from(hand: HandIndex) -> Self {
        match hand {
            HandIndex::First => 0,
            HandIndex::Second => 1,
        }
    }
}

impl TryFrom<u8> for HandIndex {
    type Error = ScoringError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HandIndex::First),
            1 => Ok(HandIndex::Second),
            other => Err(ScoringError::InvalidHandIndex(other)),
        }
    }
}

/// A single player's scoresheet row: team plus row, e.g. `A1`, `B2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowKey {
    pub team: Team,
    pub player: PlayerRow,
}

impl RowKey {
    /// The four player rows in scoresheet order.
    pub const ALL: [RowKey; 4] = [
        RowKey::new(Team::A, PlayerRow::One),
        RowKey::new(Team::A, PlayerRow::Two),
        RowKey::new(Team::B, PlayerRow::One),
        RowKey::new(Team::B, PlayerRow::Two),
    ];

    #[must_use]
    pub const fn new(team: Team, player: PlayerRow) -> Self {
        Self { team, player }
    }

    /// The teammate's row.
    #[must_use]
    pub const fn partner(self) -> Self {
        Self::new(self.team, self.player.partner())
    }

    /// Dense index 0..4 in scoresheet order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.team.index() * 2
            + match self.player {
                PlayerRow::One => 0,
                PlayerRow::Two => 1,
            }
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.team, self.player)
    }
}

impl FromStr for RowKey {
    type Err = ScoringError;

    /// Parse `"A1"`, `"b2"`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(t), Some(p), None) => {
                let team = t.to_string().parse()?;
                let player = p.to_string().parse()?;
                Ok(RowKey::new(team, player))
            }
            _ => Err(ScoringError::InvalidPlayerRow(s.to_string())),
        }
    }
}

/// Per-team storage with O(1) access by `Team`.
///
/// Serializes as `{"A": .., "B": ..}`.
///
/// ```
/// use par_doubles::core::{Team, TeamMap};
///
/// let mut games: TeamMap<u8> = TeamMap::default();
/// games[Team::B] += 1;
/// assert_eq!(games[Team::A], 0);
/// assert_eq!(games[Team::B], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    #[serde(rename = "A")]
    pub a: T,
    #[serde(rename = "B")]
    pub b: T,
}

impl<T> TeamMap<T> {
    #[must_use]
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Iterate over (Team, &T) pairs, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::A, &self.a), (Team::B, &self.b)].into_iter()
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

/// Points per team.
pub type Score = TeamMap<u32>;

impl TeamMap<u32> {
    /// Points played so far.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.a + self.b
    }

    /// Absolute difference between the two scores.
    #[must_use]
    pub const fn margin(&self) -> u32 {
        self.a.abs_diff(self.b)
    }

    /// The team ahead, or `None` when level.
    #[must_use]
    pub fn leader(&self) -> Option<Team> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}
