//! Universe (dimension schema) errors.

use super::error_code::{self, LabyrinthErrorCode};

/// Errors that can occur while assembling a Universe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("Universe must declare at least one dimension")]
    NoDimensions,

    #[error("Duplicate dimension key \"{key}\".")]
    DuplicateDimension { key: String },

    #[error("Duplicate symbol \"{symbol}\" for dimension kind {kind}.")]
    DuplicateSymbol { kind: String, symbol: String },

    #[error("Unknown dimension kind \"{kind}\".")]
    UnknownKind { kind: String },
}

impl LabyrinthErrorCode for UniverseError {
    fn error_code(&self) -> &'static str {
        error_code::UNIVERSE_ERROR
    }
}
