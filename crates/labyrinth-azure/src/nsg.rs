//! Network security group verdicts as unions of boxes.

use labyrinth_analysis::{ConstraintSet, DimensionKind, Disjunction, IntervalSet, Simplifier, Universe};
use labyrinth_core::errors::ConvertError;

use crate::types::{Access, AzureNetworkSecurityGroup, AzureSecurityRule, RuleDirection};

const ANY: &str = "*";
const VIRTUAL_NETWORK_TAG: &str = "VirtualNetwork";
const INTERNET_TAG: &str = "Internet";

/// Resolves the address-valued parts of security rules for one subnet.
pub struct RuleContext<'a> {
    pub simplifier: &'a Simplifier,
    /// The containing virtual network's address space.
    pub address_space: &'a IntervalSet,
}

impl RuleContext<'_> {
    fn universe(&self) -> &Universe {
        self.simplifier.universe()
    }

    /// The traffic `nsg` lets through in `direction`.
    ///
    /// Rules are evaluated in priority order with first-match semantics, so
    /// each Allow rule only contributes what no earlier rule claimed. No NSG
    /// allows everything.
    pub fn allowed(
        &self,
        nsg: Option<&AzureNetworkSecurityGroup>,
        direction: RuleDirection,
    ) -> Result<Disjunction, ConvertError> {
        let Some(nsg) = nsg else {
            return Ok(Disjunction::single(self.simplifier.whole()));
        };

        let mut rules: Vec<&AzureSecurityRule> = nsg
            .properties
            .security_rules
            .iter()
            .chain(&nsg.properties.default_security_rules)
            .filter(|rule| rule.properties.direction == direction)
            .collect();
        rules.sort_by_key(|rule| rule.properties.priority);

        let mut prior: Vec<ConstraintSet> = Vec::with_capacity(rules.len());
        let mut allowed: Vec<ConstraintSet> = Vec::new();
        for rule in rules {
            let set = self.rule_box(rule)?;
            match rule.properties.access {
                Access::Allow => allowed.extend(self.simplifier.subtract_all(&set, &prior)),
                Access::Deny => {}
            }
            prior.push(set);
        }
        Ok(self.simplifier.union_simplify(allowed))
    }

    /// The box a single security rule matches.
    pub fn rule_box(&self, rule: &AzureSecurityRule) -> Result<ConstraintSet, ConvertError> {
        let p = &rule.properties;
        let mut set = self.simplifier.whole();
        for (key, items) in [
            ("sourceIp", p.source_addresses()),
            ("sourcePort", p.source_ports()),
            ("destinationIp", p.destination_addresses()),
            ("destinationPort", p.destination_ports()),
            ("protocol", vec![p.protocol.trim()]),
        ] {
            let Some(index) = self.universe().index_of(key) else {
                continue;
            };
            let range = self.range(rule, index, &items)?;
            set = set.with_range(index, range);
        }
        Ok(set)
    }

    fn range(&self, rule: &AzureSecurityRule, index: usize, items: &[&str]) -> Result<IntervalSet, ConvertError> {
        let dimension = self.universe().dimension(index);
        if items.is_empty() || items.contains(&ANY) {
            return Ok(dimension.whole().clone());
        }

        let mut range = IntervalSet::empty();
        for item in items {
            let value = match dimension.kind {
                DimensionKind::Ip => self.address(rule, index, item)?,
                _ => self.universe().parse_range(index, item)?,
            };
            range = range.union(&value);
        }
        Ok(range)
    }

    fn address(&self, rule: &AzureSecurityRule, index: usize, item: &str) -> Result<IntervalSet, ConvertError> {
        let whole = self.universe().dimension(index).whole();
        if item.eq_ignore_ascii_case(VIRTUAL_NETWORK_TAG) {
            return Ok(self.address_space.clone());
        }
        if item.eq_ignore_ascii_case(INTERNET_TAG) {
            return Ok(self.address_space.complement(whole));
        }
        let is_literal = item.starts_with(|c: char| c.is_ascii_digit());
        let is_symbol = self.universe().symbols().resolve(DimensionKind::Ip, item).is_some();
        if !is_literal && !is_symbol {
            return Err(ConvertError::UnsupportedServiceTag {
                tag: item.to_string(),
                rule: rule.name.clone(),
            });
        }
        Ok(self.universe().parse_range(index, item)?)
    }
}
