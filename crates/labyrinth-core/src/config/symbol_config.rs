//! Symbol substitutions declared in configuration.

use serde::{Deserialize, Serialize};

/// One `[[symbols]]` entry: `symbol` is replaced by `range` wherever it
/// appears as an item of a `dimension`-kind constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Dimension kind: `ip`, `port` or `protocol`.
    pub dimension: String,
    pub symbol: String,
    pub range: String,
}
