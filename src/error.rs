//! Error types for configuration and data errors.
//!
//! Engine events never fail: an illegal event is rejected and reported as a
//! value (see [`crate::engine::EventOutcome`]). The errors here cover inputs
//! that can only be wrong because the caller handed over bad data: an
//! unknown team letter, a corrupt rally log, an undecodable blob.

use thiserror::Error;

/// Why a rally log failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFault {
    /// Rally numbers must run 1, 2, 3, ... without gaps.
    OutOfSequence { expected: u32 },
    /// The record names a server the rotation could not have produced.
    WrongServer,
    /// The record's hand index disagrees with the rotation.
    WrongHand,
    /// The record's side disagrees with the mechanically derived side.
    WrongSide,
    /// A rally was recorded after the game had already been decided.
    AfterGameEnd,
}

impl std::fmt::Display for LogFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFault::OutOfSequence { expected } => {
                write!(f, "rally number out of sequence (expected {expected})")
            }
            LogFault::WrongServer => write!(f, "server does not match rotation"),
            LogFault::WrongHand => write!(f, "hand index does not match rotation"),
            LogFault::WrongSide => write!(f, "serve side does not match rotation"),
            LogFault::AfterGameEnd => write!(f, "rally recorded after game end"),
        }
    }
}

/// Configuration or data error surfaced to the caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("invalid team: {0:?}")]
    InvalidTeam(String),

    #[error("invalid player row: {0:?}")]
    InvalidPlayerRow(String),

    #[error("invalid serve side: {0:?}")]
    InvalidSide(String),

    #[error("invalid hand index: {0}")]
    InvalidHandIndex(u8),

    #[error("invalid cell: {0:?}")]
    InvalidCell(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid rally log at rally {rally_number}: {reason}")]
    InvalidRallyLog { rally_number: u32, reason: LogFault },

    #[error("codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for ScoringError {
    fn from(err: bincode::Error) -> Self {
        ScoringError::Codec(err.to_string())
    }
}
