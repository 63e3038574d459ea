//! Live rally engine.
//!
//! `RallyEngine` owns one game: score, server, grid, rally log and undo
//! history. It accepts the `GameEvent` vocabulary and answers every event
//! with an `EventOutcome`. Events are total: an event that does not fit the
//! current state is rejected and changes nothing.

mod event;
mod machine;

pub use event::{EventOutcome, GameCompleted, GameEvent, RejectReason, Roster};
pub use machine::{EngineState, RallyEngine};
