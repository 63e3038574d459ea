//! Binary persistence for rally logs and snapshots.
//!
//! `bincode` encodes the same serde shape the JSON wire format uses, only
//! compactly. A log is all that needs storing; a snapshot lets a reader
//! resume without replaying from the first rally.

use crate::core::{GameSnapshot, RallyLog, RallyRecord};
use crate::error::ScoringError;

/// Encode a rally log.
pub fn encode_log(log: &[RallyRecord]) -> Result<Vec<u8>, ScoringError> {
    Ok(bincode::serialize(log)?)
}

/// Decode a rally log written by [`encode_log`].
///
/// Only the encoding is checked here. Use [`crate::grid::validate_log`] to
/// check the records against the rules.
pub fn decode_log(bytes: &[u8]) -> Result<RallyLog, ScoringError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encode a snapshot.
pub fn encode_snapshot(snapshot: &GameSnapshot) -> Result<Vec<u8>, ScoringError> {
    Ok(bincode::serialize(snapshot)?)
}

/// Decode a snapshot written by [`encode_snapshot`].
pub fn decode_snapshot(bytes: &[u8]) -> Result<GameSnapshot, ScoringError> {
    Ok(bincode::deserialize(bytes)?)
}
