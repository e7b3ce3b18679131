//! Top-level error aggregating every subsystem.

use super::error_code::LabyrinthErrorCode;
use super::{ConfigError, ConvertError, GraphError, RangeError, UniverseError};

/// Any error a Labyrinth session can surface.
#[derive(Debug, thiserror::Error)]
pub enum LabyrinthError {
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("Universe error: {0}")]
    Universe(#[from] UniverseError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LabyrinthErrorCode for LabyrinthError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Range(e) => e.error_code(),
            Self::Universe(e) => e.error_code(),
            Self::Graph(e) => e.error_code(),
            Self::Convert(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
