//! Dimension kinds: domain, literal parsing and display.

use std::fmt;
use std::str::FromStr;

use labyrinth_core::constants::{MAX_PORT, MAX_PROTOCOL};
use labyrinth_core::errors::{RangeError, UniverseError};
use serde::{Deserialize, Serialize};

use super::interval_set::{Interval, IntervalSet};
use super::{ip, port, protocol};
use crate::universe::SymbolTable;

/// Keyword introducing a complemented literal, e.g. `except 10.0.0.0/8`.
const EXCEPT: &str = "except";

/// The range algebra a dimension uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    /// IPv4 addresses, written as addresses, CIDR prefixes or address ranges.
    Ip,
    /// Transport ports 0-65535.
    Port,
    /// IP protocol numbers 0-255, written by name where one is known.
    Protocol,
}

impl DimensionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Port => "port",
            Self::Protocol => "protocol",
        }
    }

    /// The full domain of values.
    pub fn domain(&self) -> Interval {
        match self {
            Self::Ip => Interval::new(0, u32::MAX),
            Self::Port => Interval::new(0, MAX_PORT),
            Self::Protocol => Interval::new(0, MAX_PROTOCOL),
        }
    }

    /// The unconstrained value.
    pub fn whole(&self) -> IntervalSet {
        IntervalSet::from_interval(self.domain())
    }

    /// Parse a literal without symbol substitution.
    pub fn parse(&self, text: &str) -> Result<IntervalSet, RangeError> {
        self.parse_with(text, &SymbolTable::default())
    }

    /// Parse `["except "] item ("," item)*`, substituting symbols item by item.
    ///
    /// A symbol's literal is itself parsed as a full expression (it may be a
    /// list or an `except` form) but is not substituted again.
    pub fn parse_with(&self, text: &str, symbols: &SymbolTable) -> Result<IntervalSet, RangeError> {
        let trimmed = text.trim();
        let (negated, body) = match strip_except(trimmed) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut set = IntervalSet::empty();
        for item in body.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(RangeError::EmptyItem {
                    text: text.to_string(),
                });
            }
            let value = match symbols.resolve(*self, item) {
                Some(literal) => self.parse_with(literal, &SymbolTable::default())?,
                None => self.parse_item(item)?,
            };
            set = set.union(&value);
        }

        if negated {
            Ok(set.complement(&self.whole()))
        } else {
            Ok(set)
        }
    }

    fn parse_item(&self, item: &str) -> Result<IntervalSet, RangeError> {
        if item == "*" || item.eq_ignore_ascii_case("any") {
            return Ok(self.whole());
        }
        match self {
            Self::Ip => ip::parse_item(item),
            Self::Port => port::parse_item(item),
            Self::Protocol => protocol::parse_item(item),
        }
    }

    /// Render a value, choosing the `except` form when the complement
    /// needs strictly fewer items.
    pub fn format(&self, set: &IntervalSet) -> String {
        let whole = self.whole();
        if *set == whole {
            return "*".to_string();
        }
        if set.is_empty() {
            return "(none)".to_string();
        }
        let direct = self.format_items(set);
        let inverse = self.format_items(&set.complement(&whole));
        if inverse.len() < direct.len() {
            format!("{EXCEPT} {}", inverse.join(", "))
        } else {
            direct.join(", ")
        }
    }

    fn format_items(&self, set: &IntervalSet) -> Vec<String> {
        match self {
            Self::Ip => ip::format_items(set),
            Self::Port => port::format_items(set),
            Self::Protocol => protocol::format_items(set),
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DimensionKind {
    type Err = UniverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" | "address" => Ok(Self::Ip),
            "port" => Ok(Self::Port),
            "protocol" => Ok(Self::Protocol),
            other => Err(UniverseError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Strip a leading `except` keyword (case-insensitive, followed by whitespace).
fn strip_except(text: &str) -> Option<&str> {
    let head = text.get(..EXCEPT.len())?;
    let rest = text.get(EXCEPT.len()..)?;
    if head.eq_ignore_ascii_case(EXCEPT) && rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}
