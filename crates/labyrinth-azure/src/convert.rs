//! Azure resource graph → graph spec.
//!
//! Emitted topology:
//!
//! - `Internet`: endpoint; forwards to each public IP's `/inbound` node.
//! - one router per virtual network: subnets by prefix, then public-IP
//!   egress by private source address, then `Internet` for everything
//!   outside the address space.
//! - per subnet, `/inbound` and `/outbound` nodes carrying the NSG verdict.
//! - one endpoint per NIC IP configuration.
//! - per public IP, `/inbound` (destination rewritten to the private
//!   address) and `/outbound` (source rewritten to the public address).

use std::sync::Arc;

use labyrinth_analysis::{
    ConstraintSet, DimensionKind, GraphSpec, IntervalSet, NodeSpec, RuleSpec, Simplifier,
    SymbolTable, Universe,
};
use labyrinth_core::constants::AZURE_LOAD_BALANCER_ADDRESS;
use labyrinth_core::errors::{ConvertError, UniverseError};
use labyrinth_core::types::FxHashMap;

use crate::index::ResourceIndex;
use crate::nsg::RuleContext;
use crate::shortener::NameShortener;
use crate::types::{AzurePublicIp, AzureResource, RuleDirection};

/// Key of the node standing for everything outside the virtual networks.
pub const INTERNET_KEY: &str = "Internet";

/// Symbols Azure uses in security rules.
pub fn azure_symbols() -> Result<SymbolTable, UniverseError> {
    SymbolTable::new()
        .with(DimensionKind::Ip, "AzureLoadBalancer", AZURE_LOAD_BALANCER_ADDRESS)?
        .with(DimensionKind::Protocol, "Tcp", "tcp")?
        .with(DimensionKind::Protocol, "Udp", "udp")?
        .with(DimensionKind::Protocol, "Icmp", "icmp")?
        .with(DimensionKind::Protocol, "Esp", "50")?
        .with(DimensionKind::Protocol, "Ah", "51")
}

/// A NIC IP configuration as seen by the topology.
struct Endpoint {
    key: String,
    address: String,
    subnet_id: String,
}

/// A public IP and what it is bound to.
struct PublicBinding<'a> {
    pip: &'a AzurePublicIp,
    key: String,
    address: Option<&'a str>,
    /// `(private address, lowercased vnet id)` when bound.
    private: Option<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct AzureConverter {
    simplifier: Simplifier,
}

impl AzureConverter {
    pub fn new() -> Result<Self, ConvertError> {
        let universe = Universe::firewall_with_symbols(azure_symbols()?);
        Ok(Self::with_simplifier(Simplifier::new(Arc::new(universe))))
    }

    pub fn with_simplifier(simplifier: Simplifier) -> Self {
        Self { simplifier }
    }

    /// Convert the JSON output of a resource graph query: either a bare
    /// array of resources or an object with a `data` array.
    pub fn convert_str(&self, json: &str) -> Result<GraphSpec, ConvertError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let resources = match value {
            serde_json::Value::Array(items) => items,
            serde_json::Value::Object(mut map) => match map.remove("data") {
                Some(serde_json::Value::Array(items)) => items,
                _ => {
                    return Err(ConvertError::MalformedResource {
                        id: "(root)".to_string(),
                        message: "expected an array of resources".to_string(),
                    })
                }
            },
            _ => {
                return Err(ConvertError::MalformedResource {
                    id: "(root)".to_string(),
                    message: "expected an array of resources".to_string(),
                })
            }
        };
        self.convert(&resources)
    }

    pub fn convert(&self, resources: &[serde_json::Value]) -> Result<GraphSpec, ConvertError> {
        let mut parsed = Vec::with_capacity(resources.len());
        let mut skipped = 0usize;
        for value in resources {
            match AzureResource::parse(value)? {
                Some(resource) => parsed.push(resource),
                None => {
                    skipped += 1;
                    tracing::debug!(
                        id = value.get("id").and_then(|v| v.as_str()).unwrap_or_default(),
                        kind = value.get("type").and_then(|v| v.as_str()).unwrap_or_default(),
                        "resource skipped"
                    );
                }
            }
        }
        let converted = parsed.len();
        reject_unsupported(&parsed)?;

        let index = ResourceIndex::new(parsed);
        let mut shortener = NameShortener::new();
        for id in index.ids() {
            shortener.add(id);
        }
        shortener.finish();

        let spec = Topology {
            simplifier: &self.simplifier,
            index: &index,
            shortener: &shortener,
        }
        .build()?;

        tracing::info!(
            resources_converted = converted,
            resources_skipped = skipped,
            node_count = spec.nodes.len(),
            "azure resource graph converted"
        );
        Ok(spec)
    }
}

/// Features present in the input that the topology does not model.
fn reject_unsupported(resources: &[AzureResource]) -> Result<(), ConvertError> {
    for resource in resources {
        match resource {
            AzureResource::NetworkInterface(nic) if nic.properties.network_security_group.is_some() => {
                return Err(ConvertError::UnsupportedResource {
                    kind: "microsoft.network/networkinterfaces/networksecuritygroup".to_string(),
                    id: nic.id.clone(),
                });
            }
            AzureResource::VirtualNetwork(vnet) if !vnet.properties.virtual_network_peerings.is_empty() => {
                return Err(ConvertError::UnsupportedResource {
                    kind: "microsoft.network/virtualnetworks/virtualnetworkpeerings".to_string(),
                    id: vnet.id.clone(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

struct Topology<'a> {
    simplifier: &'a Simplifier,
    index: &'a ResourceIndex,
    shortener: &'a NameShortener,
}

impl Topology<'_> {
    fn key(&self, id: &str) -> Result<String, ConvertError> {
        self.shortener
            .shorten(id)
            .map(str::to_string)
            .ok_or_else(|| ConvertError::UnresolvedReference { id: id.to_string() })
    }

    fn build(&self) -> Result<GraphSpec, ConvertError> {
        let endpoints = self.endpoints()?;
        let bindings = self.public_bindings()?;

        let mut internet = NodeSpec::new(INTERNET_KEY).endpoint();
        for binding in &bindings {
            if let Some(address) = binding.address {
                internet = internet.rule(
                    RuleSpec::to(&format!("{}/inbound", binding.key)).with("destinationIp", address),
                );
            }
        }
        let mut nodes = vec![internet];

        for vnet in &self.index.vnets {
            let router = self.key(&vnet.id)?;
            let prefixes = vnet.properties.address_space.address_prefixes.join(", ");
            let outside = format!("except {prefixes}");
            let space = self.address_space(&prefixes)?;

            let mut router_node = NodeSpec::new(&router);
            for subnet in &vnet.properties.subnets {
                router_node = router_node.rule(
                    RuleSpec::to(&format!("{}/inbound", self.key(&subnet.id)?))
                        .with("destinationIp", &subnet.properties.address_prefix),
                );
            }
            let vnet_id = vnet.id.to_ascii_lowercase();
            for binding in &bindings {
                if let Some((private, _)) = binding.private.as_ref().filter(|(_, v)| *v == vnet_id) {
                    router_node = router_node.rule(
                        RuleSpec::to(&format!("{}/outbound", binding.key))
                            .with("sourceIp", private)
                            .with("destinationIp", &outside),
                    );
                }
            }
            router_node = router_node.rule(RuleSpec::to(INTERNET_KEY).with("destinationIp", &outside));
            nodes.push(router_node);

            let context = RuleContext {
                simplifier: self.simplifier,
                address_space: &space,
            };
            for subnet in &vnet.properties.subnets {
                let subnet_key = self.key(&subnet.id)?;
                let nsg = subnet
                    .properties
                    .network_security_group
                    .as_ref()
                    .map(|r| self.index.network_security_group(r))
                    .transpose()?;
                let provenance = nsg.map(|g| self.key(&g.id)).transpose()?;

                let mut inbound = NodeSpec::new(&format!("{subnet_key}/inbound"));
                let allowed_in = context.allowed(nsg, RuleDirection::Inbound)?;
                let subnet_id = subnet.id.to_ascii_lowercase();
                for endpoint in endpoints.iter().filter(|e| e.subnet_id == subnet_id) {
                    let host = self
                        .simplifier
                        .universe()
                        .constraint_set(&endpoint.key, [("destinationIp", endpoint.address.as_str())])?;
                    for allowed in &allowed_in {
                        let set = allowed.intersect(&host);
                        if !set.is_empty() {
                            inbound = inbound.rule(self.rule_for(&endpoint.key, &set, provenance.as_deref()));
                        }
                    }
                }
                nodes.push(inbound);

                let mut outbound = NodeSpec::new(&format!("{subnet_key}/outbound"));
                for allowed in &context.allowed(nsg, RuleDirection::Outbound)? {
                    outbound = outbound.rule(self.rule_for(&router, allowed, provenance.as_deref()));
                }
                nodes.push(outbound);
            }
        }

        for endpoint in &endpoints {
            let subnet_key = self.key(&endpoint.subnet_id)?;
            nodes.push(
                NodeSpec::new(&endpoint.key).endpoint().rule(
                    RuleSpec::to(&format!("{subnet_key}/outbound")).with("sourceIp", &endpoint.address),
                ),
            );
        }

        for binding in &bindings {
            let mut inbound = NodeSpec::new(&format!("{}/inbound", binding.key));
            if let Some((private, vnet_id)) = &binding.private {
                let router = self.key(vnet_id)?;
                inbound = inbound.rule(RuleSpec::to(&router).rewrite("destinationIp", private));
                nodes.push(inbound);

                let public = binding.address.ok_or_else(|| ConvertError::MalformedResource {
                    id: binding.pip.id.clone(),
                    message: "bound public IP has no ipAddress".to_string(),
                })?;
                nodes.push(
                    NodeSpec::new(&format!("{}/outbound", binding.key))
                        .rule(RuleSpec::to(INTERNET_KEY).rewrite("sourceIp", public)),
                );
            } else {
                nodes.push(inbound);
            }
        }

        Ok(GraphSpec::new(nodes))
    }

    fn endpoints(&self) -> Result<Vec<Endpoint>, ConvertError> {
        let mut endpoints = Vec::new();
        for nic in &self.index.nics {
            for config in &nic.properties.ip_configurations {
                let reference = config.properties.subnet.as_ref().ok_or_else(|| {
                    ConvertError::MalformedResource {
                        id: config.id.clone(),
                        message: "IP configuration has no subnet".to_string(),
                    }
                })?;
                let subnet = self.index.subnet(reference)?;
                endpoints.push(Endpoint {
                    key: self.key(&config.id)?,
                    address: config.properties.private_ip_address.clone(),
                    subnet_id: subnet.subnet.id.to_ascii_lowercase(),
                });
            }
        }
        Ok(endpoints)
    }

    fn public_bindings(&self) -> Result<Vec<PublicBinding<'_>>, ConvertError> {
        let mut vnet_of_subnet: FxHashMap<String, String> = FxHashMap::default();
        for vnet in &self.index.vnets {
            for subnet in &vnet.properties.subnets {
                vnet_of_subnet.insert(subnet.id.to_ascii_lowercase(), vnet.id.to_ascii_lowercase());
            }
        }

        self.index
            .public_ips
            .iter()
            .map(|pip| {
                let private = match &pip.properties.ip_configuration {
                    Some(reference) => {
                        let bound = self.index.ip_configuration(reference)?;
                        let subnet = bound.config.properties.subnet.as_ref().ok_or_else(|| {
                            ConvertError::MalformedResource {
                                id: bound.config.id.clone(),
                                message: "IP configuration has no subnet".to_string(),
                            }
                        })?;
                        let vnet_id = vnet_of_subnet
                            .get(&subnet.id.to_ascii_lowercase())
                            .cloned()
                            .ok_or_else(|| ConvertError::UnresolvedReference { id: subnet.id.clone() })?;
                        Some((bound.config.properties.private_ip_address.clone(), vnet_id))
                    }
                    None => None,
                };
                Ok(PublicBinding {
                    pip,
                    key: self.key(&pip.id)?,
                    address: pip.properties.ip_address.as_deref(),
                    private,
                })
            })
            .collect()
    }

    fn address_space(&self, prefixes: &str) -> Result<IntervalSet, ConvertError> {
        let universe = self.simplifier.universe();
        let index = universe
            .index_of("destinationIp")
            .ok_or_else(|| ConvertError::MalformedResource {
                id: "(universe)".to_string(),
                message: "no destinationIp dimension".to_string(),
            })?;
        Ok(universe.parse_range(index, prefixes)?)
    }

    fn rule_for(
        &self,
        destination: &str,
        set: &ConstraintSet,
        provenance: Option<&str>,
    ) -> RuleSpec {
        let mut rule = RuleSpec::to(destination);
        for (key, literal) in self.simplifier.universe().literals(set) {
            rule = rule.with(&key, &literal);
        }
        if let Some(id) = provenance {
            rule = rule.with_id(id);
        }
        rule
    }
}
