//! The Universe: the ordered dimension schema shared by one analysis session.
//!
//! Dimension order is significant: it fixes the layout of every
//! [`ConstraintSet`] and the order in which dimensions are displayed.

pub mod symbols;

use labyrinth_core::config::SymbolConfig;
use labyrinth_core::errors::{GraphError, RangeError, UniverseError};
use labyrinth_core::types::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dimensions::{DimensionKind, IntervalSet};
use crate::setops::ConstraintSet;

pub use symbols::SymbolTable;

/// Declaration of one dimension: rule key, display name and algebra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    /// Key used in rule specs, e.g. `destinationPort`.
    pub key: String,
    /// Display name used in reports, e.g. `destination port`.
    pub name: String,
    pub kind: DimensionKind,
}

impl DimensionSpec {
    pub fn new(key: &str, name: &str, kind: DimensionKind) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            kind,
        }
    }
}

/// A dimension of a built Universe.
#[derive(Debug, Clone)]
pub struct Dimension {
    pub key: String,
    pub name: String,
    pub kind: DimensionKind,
    whole: IntervalSet,
}

impl Dimension {
    /// The unconstrained value of this dimension.
    pub fn whole(&self) -> &IntervalSet {
        &self.whole
    }

    /// Render a value of this dimension.
    pub fn format(&self, range: &IntervalSet) -> String {
        self.kind.format(range)
    }
}

/// Ordered dimension schema plus symbol substitutions.
#[derive(Debug, Clone)]
pub struct Universe {
    dimensions: Vec<Dimension>,
    by_key: FxHashMap<String, usize>,
    symbols: SymbolTable,
}

impl Universe {
    pub fn new(specs: Vec<DimensionSpec>, symbols: SymbolTable) -> Result<Self, UniverseError> {
        if specs.is_empty() {
            return Err(UniverseError::NoDimensions);
        }
        let mut universe = Self {
            dimensions: Vec::with_capacity(specs.len()),
            by_key: FxHashMap::default(),
            symbols,
        };
        for spec in specs {
            if universe.by_key.contains_key(&spec.key) {
                return Err(UniverseError::DuplicateDimension { key: spec.key });
            }
            universe.push(spec);
        }
        Ok(universe)
    }

    /// The five-dimension firewall schema used for cloud network topologies.
    pub fn firewall() -> Self {
        Self::firewall_with_symbols(SymbolTable::default())
    }

    pub fn firewall_with_symbols(symbols: SymbolTable) -> Self {
        let mut universe = Self {
            dimensions: Vec::with_capacity(5),
            by_key: FxHashMap::default(),
            symbols,
        };
        for spec in firewall_dimensions() {
            universe.push(spec);
        }
        universe
    }

    /// Firewall schema with symbols taken from configuration.
    pub fn from_config(symbols: &[SymbolConfig]) -> Result<Self, UniverseError> {
        Ok(Self::firewall_with_symbols(SymbolTable::from_config(symbols)?))
    }

    fn push(&mut self, spec: DimensionSpec) {
        self.by_key.insert(spec.key.clone(), self.dimensions.len());
        self.dimensions.push(Dimension {
            whole: spec.kind.whole(),
            key: spec.key,
            name: spec.name,
            kind: spec.kind,
        });
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, index: usize) -> &Dimension {
        &self.dimensions[index]
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Position of the dimension with rule key `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The box that constrains nothing.
    pub fn whole(&self) -> ConstraintSet {
        ConstraintSet::from_ranges(self.dimensions.iter().map(|d| d.whole.clone()))
    }

    /// Parse one literal for the dimension at `index`, with symbol substitution.
    pub fn parse_range(&self, index: usize, text: &str) -> Result<IntervalSet, RangeError> {
        self.dimensions[index].kind.parse_with(text, &self.symbols)
    }

    /// Build a box from `(dimension key, literal)` pairs; omitted dimensions
    /// are whole. `node` names the owner for error messages.
    pub fn constraint_set<'a, I>(&self, node: &str, constraints: I) -> Result<ConstraintSet, GraphError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut set = self.whole();
        for (key, text) in constraints {
            let index = self.index_of(key).ok_or_else(|| GraphError::UnknownDimension {
                node: node.to_string(),
                dimension: key.to_string(),
            })?;
            let range = self
                .parse_range(index, text)
                .map_err(|source| GraphError::InvalidConstraint {
                    node: node.to_string(),
                    dimension: key.to_string(),
                    source,
                })?;
            set = set.with_range(index, range);
        }
        Ok(set)
    }

    /// The inverse of [`Universe::constraint_set`]: `(dimension key, literal)`
    /// for every dimension `set` constrains.
    pub fn literals(&self, set: &ConstraintSet) -> Vec<(String, String)> {
        self.dimensions
            .iter()
            .zip(set.ranges())
            .filter(|(dimension, range)| *range != dimension.whole())
            .map(|(dimension, range)| (dimension.key.clone(), dimension.format(range)))
            .collect()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::firewall()
    }
}

fn firewall_dimensions() -> Vec<DimensionSpec> {
    vec![
        DimensionSpec::new("sourceIp", "source ip", DimensionKind::Ip),
        DimensionSpec::new("sourcePort", "source port", DimensionKind::Port),
        DimensionSpec::new("destinationIp", "destination ip", DimensionKind::Ip),
        DimensionSpec::new("destinationPort", "destination port", DimensionKind::Port),
        DimensionSpec::new("protocol", "protocol", DimensionKind::Protocol),
    ]
}
