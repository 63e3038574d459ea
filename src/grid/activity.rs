//! The scoresheet grid.
//!
//! Four player rows (A1, A2, B1, B2) and two merged team rows (A, B). A
//! column is the serving team's score when the serve began. Rows grow on
//! demand and unwritten columns read as `Cell::Empty`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::core::{PlayerRow, RowKey, Team};
use crate::rules::{Mark, MarkTarget};

/// Width of one rendered column, wide enough for `"R/"` plus a gap.
const RENDER_WIDTH: usize = 3;

/// Scoresheet rows, persistent for O(1) snapshot clones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityGrid {
    #[serde(rename = "A1")]
    a1: Vector<Cell>,
    #[serde(rename = "A2")]
    a2: Vector<Cell>,
    #[serde(rename = "B1")]
    b1: Vector<Cell>,
    #[serde(rename = "B2")]
    b2: Vector<Cell>,
    #[serde(rename = "A")]
    team_a: Vector<Cell>,
    #[serde(rename = "B")]
    team_b: Vector<Cell>,
}

impl ActivityGrid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A player's row.
    #[must_use]
    pub fn row(&self, key: RowKey) -> &Vector<Cell> {
        match (key.team, key.player) {
            (Team::A, PlayerRow::One) => &self.a1,
            (Team::A, PlayerRow::Two) => &self.a2,
            (Team::B, PlayerRow::One) => &self.b1,
            (Team::B, PlayerRow::Two) => &self.b2,
        }
    }

    /// A team's merged row.
    #[must_use]
    pub fn team_row(&self, team: Team) -> &Vector<Cell> {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    fn target_mut(&mut self, target: MarkTarget) -> &mut Vector<Cell> {
        match target {
            MarkTarget::Player(key) => match (key.team, key.player) {
                (Team::A, PlayerRow::One) => &mut self.a1,
                (Team::A, PlayerRow::Two) => &mut self.a2,
                (Team::B, PlayerRow::One) => &mut self.b1,
                (Team::B, PlayerRow::Two) => &mut self.b2,
            },
            MarkTarget::Team(Team::A) => &mut self.team_a,
            MarkTarget::Team(Team::B) => &mut self.team_b,
        }
    }

    /// Cell in a player's row; `Empty` past the written width.
    #[must_use]
    pub fn cell(&self, key: RowKey, column: u32) -> Cell {
        self.row(key).get(column as usize).copied().unwrap_or_default()
    }

    /// Cell in a team's merged row; `Empty` past the written width.
    #[must_use]
    pub fn team_cell(&self, team: Team, column: u32) -> Cell {
        self.team_row(team).get(column as usize).copied().unwrap_or_default()
    }

    /// Write one mark, padding the row with empty cells as needed.
    pub fn apply(&mut self, mark: &Mark) {
        let row = self.target_mut(mark.target);
        let column = mark.column as usize;
        while row.len() <= column {
            row.push_back(Cell::Empty);
        }
        row.set(column, mark.cell);
    }

    /// Write all marks of one rally, in order.
    pub fn apply_all(&mut self, marks: &[Mark]) {
        for mark in marks {
            self.apply(mark);
        }
    }

    /// Widest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows().map(|(_, row)| row.len()).max().unwrap_or(0)
    }

    /// True if no cell holds a mark.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.rows().all(|(_, row)| row.iter().all(|c| c.is_empty()))
    }

    /// A player's row as literal marks. Convenient for fixtures.
    #[must_use]
    pub fn row_marks(&self, key: RowKey) -> Vec<&'static str> {
        self.row(key).iter().map(|c| c.as_str()).collect()
    }

    /// All six rows with their labels, in scoresheet order.
    pub fn rows(&self) -> impl Iterator<Item = (String, &Vector<Cell>)> {
        [
            ("A1".to_string(), &self.a1),
            ("A2".to_string(), &self.a2),
            ("A".to_string(), &self.team_a),
            ("B1".to_string(), &self.b1),
            ("B2".to_string(), &self.b2),
            ("B".to_string(), &self.team_b),
        ]
        .into_iter()
    }
}

/// Paper-style text rendering: a header of column numbers, then one line per
/// row.
///
/// ```text
///     0  1  2
/// A1  R  L/
/// A2        R/
/// ```
impl std::fmt::Display for ActivityGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.width();

        let mut header = format!("{:<4}", "");
        for column in 0..width {
            header.push_str(&format!("{:<w$}", column, w = RENDER_WIDTH));
        }
        writeln!(f, "{}", header.trim_end())?;

        for (label, row) in self.rows() {
            let mut line = format!("{:<4}", label);
            for column in 0..width {
                let cell = row.get(column).copied().unwrap_or_default();
                line.push_str(&format!("{:<w$}", cell.as_str(), w = RENDER_WIDTH));
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
