//! Scoresheet cell marks.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::Side;
use crate::error::ScoringError;

/// A mark in one column of a scoresheet row.
///
/// Serialized as the literal mark: `""`, `"R"`, `"L"`, `"R/"`, `"L/"`,
/// `"X"`, `"/"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    #[serde(rename = "")]
    Empty,
    /// Served from the right box and won the rally.
    #[serde(rename = "R")]
    R,
    /// Served from the left box and won the rally.
    #[serde(rename = "L")]
    L,
    /// Served from the right box and lost the hand.
    #[serde(rename = "R/")]
    RSlash,
    /// Served from the left box and lost the hand.
    #[serde(rename = "L/")]
    LSlash,
    /// Team row: point won while receiving, no side-out.
    #[serde(rename = "X")]
    X,
    /// Opening-hand partner who never got to serve.
    #[serde(rename = "/")]
    Slash,
}

impl Cell {
    /// Mark for a serve that won the rally.
    #[must_use]
    pub const fn served(side: Side) -> Self {
        match side {
            Side::R => Cell::R,
            Side::L => Cell::L,
        }
    }

    /// Mark for a serve that lost the rally.
    #[must_use]
    pub const fn lost(side: Side) -> Self {
        match side {
            Side::R => Cell::RSlash,
            Side::L => Cell::LSlash,
        }
    }

    /// The box served from, if this is a serve mark.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::R | Cell::RSlash => Some(Side::R),
            Cell::L | Cell::LSlash => Some(Side::L),
            Cell::Empty | Cell::X | Cell::Slash => None,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The literal scoresheet mark.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::R => "R",
            Cell::L => "L",
            Cell::RSlash => "R/",
            Cell::LSlash => "L/",
            Cell::X => "X",
            Cell::Slash => "/",
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cell {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Cell::Empty),
            "R" => Ok(Cell::R),
            "L" => Ok(Cell::L),
            "R/" => Ok(Cell::RSlash),
            "L/" => Ok(Cell::LSlash),
            "X" => Ok(Cell::X),
            "/" => Ok(Cell::Slash),
            other => Err(ScoringError::InvalidCell(other.to_string())),
        }
    }
}
