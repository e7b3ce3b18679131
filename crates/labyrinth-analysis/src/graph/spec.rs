//! Graph specification input: the node/rule records handed to the builder.
//!
//! Loadable from JSON or YAML. Dimension constraints sit next to the rule's
//! `destination` under their dimension key:
//!
//! ```yaml
//! nodes:
//!   - key: internet
//!     endpoint: true
//!     rules:
//!       - destination: gateway
//!         destinationPort: 443
//!         protocol: tcp
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path as FsPath;

use labyrinth_core::errors::GraphError;
use serde::{Deserialize, Serialize};

/// A constraint literal. YAML and JSON allow bare numbers for ports and
/// protocols, so both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Number(u64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One forwarding rule. Declaration order within a node is first-match precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    pub destination: String,
    /// Provenance of the rule, e.g. the security rule it was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Ranges written over the path box after the rule matches.
    #[serde(default, rename = "override", skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, Literal>,
    /// Dimension key → literal. Omitted dimensions are unconstrained.
    #[serde(flatten)]
    pub constraints: BTreeMap<String, Literal>,
}

impl RuleSpec {
    /// A rule forwarding all traffic to `destination`.
    pub fn to(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
            ..Self::default()
        }
    }

    pub fn with(mut self, dimension: &str, literal: &str) -> Self {
        self.constraints
            .insert(dimension.to_string(), Literal::from(literal));
        self
    }

    pub fn rewrite(mut self, dimension: &str, literal: &str) -> Self {
        self.overrides
            .insert(dimension.to_string(), Literal::from(literal));
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

/// One routing point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// A genuine traffic origin or sink; returning to it ends a flow instead
    /// of forming a loop.
    #[serde(default)]
    pub endpoint: bool,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl NodeSpec {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn endpoint(mut self) -> Self {
        self.endpoint = true;
        self
    }

    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }
}

/// An ordered list of nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
}

impl GraphSpec {
    pub fn new(nodes: Vec<NodeSpec>) -> Self {
        Self { nodes }
    }

    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        serde_json::from_str(text).map_err(|e| GraphError::SpecFormat {
            message: e.to_string(),
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, GraphError> {
        serde_yaml::from_str(text).map_err(|e| GraphError::SpecFormat {
            message: e.to_string(),
        })
    }

    /// Load from a file; `.yaml`/`.yml` select YAML, anything else JSON.
    pub fn from_path(path: &FsPath) -> Result<Self, GraphError> {
        let text = std::fs::read_to_string(path).map_err(|e| GraphError::SpecFormat {
            message: format!("{}: {e}", path.display()),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            _ => Self::from_json(&text),
        }
    }

    pub fn to_json(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(|e| GraphError::SpecFormat {
            message: e.to_string(),
        })
    }
}
