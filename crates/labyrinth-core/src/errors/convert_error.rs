//! Resource conversion errors.

use super::error_code::{self, LabyrinthErrorCode};
use super::{GraphError, RangeError, UniverseError};

/// Errors raised by converters that translate a provider resource graph
/// into node specifications. Anything the converter cannot translate is an
/// error, never skipped.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Unsupported resource type \"{kind}\" ({id}).")]
    UnsupportedResource { kind: String, id: String },

    #[error("Unsupported service tag \"{tag}\" in security rule {rule}.")]
    UnsupportedServiceTag { tag: String, rule: String },

    #[error("Unresolved reference \"{id}\".")]
    UnresolvedReference { id: String },

    #[error("Malformed resource {id}: {message}")]
    MalformedResource { id: String, message: String },

    #[error("Invalid resource graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Universe error: {0}")]
    Universe(#[from] UniverseError),
}

impl LabyrinthErrorCode for ConvertError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedResource { .. } | Self::UnsupportedServiceTag { .. } => {
                error_code::UNSUPPORTED_RESOURCE
            }
            Self::Range(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Universe(e) => e.error_code(),
            _ => error_code::CONVERT_ERROR,
        }
    }
}
