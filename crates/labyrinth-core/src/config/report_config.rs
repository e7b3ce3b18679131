//! Report rendering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VERBOSE;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// Print the box of every path and cycle. Default: true.
    pub verbose: Option<bool>,
    /// Include flows for nodes the origin cannot reach. Default: true.
    pub show_unreached: Option<bool>,
}

impl ReportConfig {
    pub fn effective_verbose(&self) -> bool {
        self.verbose.unwrap_or(DEFAULT_VERBOSE)
    }

    pub fn effective_show_unreached(&self) -> bool {
        self.show_unreached.unwrap_or(true)
    }
}
