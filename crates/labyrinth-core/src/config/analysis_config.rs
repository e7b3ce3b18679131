//! Traversal configuration.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// Configuration for the traversal engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Direction of analysis. Default: outbound.
    pub direction: Option<Direction>,
    /// Maximum number of edges in a single path. Default: unbounded.
    /// Exceeding it fails the analysis rather than truncating it.
    pub max_depth: Option<usize>,
    /// Analyze multiple origins in parallel. Default: true.
    pub parallel: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective direction, defaulting to outbound.
    pub fn effective_direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    /// Returns the effective parallelism flag, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
