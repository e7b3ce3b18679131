//! Range literal errors.

use super::error_code::{self, LabyrinthErrorCode};

/// Errors that can occur while parsing a dimension range literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Empty range item in \"{text}\"")]
    EmptyItem { text: String },

    #[error("Invalid address \"{text}\"")]
    InvalidAddress { text: String },

    #[error("Invalid prefix length in \"{text}\"")]
    InvalidPrefix { text: String },

    #[error("Invalid port \"{text}\"")]
    InvalidPort { text: String },

    #[error("Invalid protocol \"{text}\"")]
    InvalidProtocol { text: String },

    #[error("Range start exceeds end in \"{text}\"")]
    InvertedRange { text: String },
}

impl LabyrinthErrorCode for RangeError {
    fn error_code(&self) -> &'static str {
        error_code::RANGE_ERROR
    }
}
