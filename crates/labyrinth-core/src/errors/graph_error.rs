//! Graph construction and lookup errors.

use super::error_code::{self, LabyrinthErrorCode};
use super::RangeError;

/// Errors raised while building or traversing a graph.
/// All of them are fatal: no partial graph or partial analysis is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Duplicate node key \"{key}\".")]
    DuplicateKey { key: String },

    #[error("Unknown node \"{key}\".")]
    UnknownNode { key: String },

    #[error("Unknown dimension \"{dimension}\" in rule on node \"{node}\".")]
    UnknownDimension { node: String, dimension: String },

    #[error("Invalid {dimension} constraint on node \"{node}\": {source}")]
    InvalidConstraint {
        node: String,
        dimension: String,
        #[source]
        source: RangeError,
    },

    #[error("Path from \"{origin}\" exceeds depth limit of {limit}.")]
    DepthLimitExceeded { origin: String, limit: usize },

    #[error("Malformed graph spec: {message}")]
    SpecFormat { message: String },
}

impl LabyrinthErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => error_code::DUPLICATE_KEY,
            Self::UnknownNode { .. } => error_code::UNKNOWN_NODE,
            Self::UnknownDimension { .. } => error_code::UNKNOWN_DIMENSION,
            Self::InvalidConstraint { .. } => error_code::INVALID_CONSTRAINT,
            Self::DepthLimitExceeded { .. } => error_code::DEPTH_LIMIT_EXCEEDED,
            Self::SpecFormat { .. } => error_code::SPEC_FORMAT,
        }
    }
}
