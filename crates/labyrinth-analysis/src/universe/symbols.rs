//! Symbol substitutions: named aliases that resolve to range literals.
//!
//! Substitution happens while rule literals are parsed at build time,
//! never during traversal.

use labyrinth_core::config::SymbolConfig;
use labyrinth_core::errors::UniverseError;
use labyrinth_core::types::FxHashMap;

use crate::dimensions::DimensionKind;

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: FxHashMap<(DimensionKind, String), String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol` for dimensions of `kind`. Redefinition is an error.
    pub fn define(
        &mut self,
        kind: DimensionKind,
        symbol: &str,
        range: &str,
    ) -> Result<(), UniverseError> {
        let key = (kind, symbol.to_string());
        if self.entries.contains_key(&key) {
            return Err(UniverseError::DuplicateSymbol {
                kind: kind.name().to_string(),
                symbol: symbol.to_string(),
            });
        }
        self.entries.insert(key, range.to_string());
        Ok(())
    }

    pub fn with(mut self, kind: DimensionKind, symbol: &str, range: &str) -> Result<Self, UniverseError> {
        self.define(kind, symbol, range)?;
        Ok(self)
    }

    pub fn from_config(symbols: &[SymbolConfig]) -> Result<Self, UniverseError> {
        let mut table = Self::new();
        for entry in symbols {
            let kind: DimensionKind = entry.dimension.parse()?;
            table.define(kind, &entry.symbol, &entry.range)?;
        }
        Ok(table)
    }

    /// The literal `symbol` stands for, if any. Matching is exact.
    pub fn resolve(&self, kind: DimensionKind, symbol: &str) -> Option<&str> {
        self.entries
            .get(&(kind, symbol.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
