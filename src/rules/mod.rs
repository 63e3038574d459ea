//! PAR doubles scoring rules.
//!
//! - `resolve_rally`: how one rally outcome moves score, server and hand
//! - `game_ended`: when a game is decided
//!
//! Both are pure functions; the engine and the grid reconstructor are thin
//! drivers around them.

pub mod rotation;
pub mod outcome;

pub use rotation::{resolve_rally, Mark, MarkTarget, Resolution, Transition};
pub use outcome::{game_ended, GameOutcome};
