//! Scoresheet grid and its reconstruction from the rally log.
//!
//! - `Cell`: one mark (`R`, `L`, `R/`, `L/`, `X`, `/`, or empty)
//! - `ActivityGrid`: four player rows plus two merged team rows
//! - `reconstruct_grid` / `replay` / `resume`: pure replay of a rally log
//! - `validate_log`: replay that rejects records the rules could not produce

mod cell;
mod activity;
mod reconstruct;

pub use cell::Cell;
pub use activity::ActivityGrid;
pub use reconstruct::{reconstruct_grid, replay, replay_game, resume, validate_log, ReplayState};
