//! Traversal direction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which adjacency a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow rules as declared: where can traffic from the origin go?
    #[default]
    Outbound,
    /// Follow rules backwards: where can traffic reaching the origin come from?
    Inbound,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Outbound => "outbound",
            Self::Inbound => "inbound",
        }
    }

    pub fn is_outbound(&self) -> bool {
        matches!(self, Self::Outbound)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outbound" | "forward" => Ok(Self::Outbound),
            "inbound" | "backward" => Ok(Self::Inbound),
            _ => Err(ConfigError::InvalidValue {
                field: "direction".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
