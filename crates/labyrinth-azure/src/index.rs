//! Id index over the parsed resource graph, used to dereference the
//! references resources hold to each other.

use labyrinth_core::errors::ConvertError;
use labyrinth_core::types::FxHashMap;

use crate::types::{
    AzureIpConfiguration, AzureNetworkInterface, AzureNetworkSecurityGroup, AzurePublicIp,
    AzureReference, AzureResource, AzureSubnet, AzureVirtualNetwork,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    VirtualNetwork(usize),
    Subnet { vnet: usize, subnet: usize },
    NetworkInterface(usize),
    IpConfiguration { nic: usize, config: usize },
    NetworkSecurityGroup(usize),
    SecurityRule(usize),
    PublicIp(usize),
}

impl Location {
    fn kind(self) -> &'static str {
        match self {
            Self::VirtualNetwork(_) => "microsoft.network/virtualnetworks",
            Self::Subnet { .. } => "microsoft.network/virtualnetworks/subnets",
            Self::NetworkInterface(_) => "microsoft.network/networkinterfaces",
            Self::IpConfiguration { .. } => "microsoft.network/networkinterfaces/ipconfigurations",
            Self::NetworkSecurityGroup(_) => "microsoft.network/networksecuritygroups",
            Self::SecurityRule(_) => "microsoft.network/networksecuritygroups/securityrules",
            Self::PublicIp(_) => "microsoft.network/publicipaddresses",
        }
    }
}

/// A NIC IP configuration together with its owner.
#[derive(Debug, Clone, Copy)]
pub struct IpConfigurationRef<'a> {
    pub nic: &'a AzureNetworkInterface,
    pub config: &'a AzureIpConfiguration,
}

/// A subnet together with its virtual network.
#[derive(Debug, Clone, Copy)]
pub struct SubnetRef<'a> {
    pub vnet: &'a AzureVirtualNetwork,
    pub subnet: &'a AzureSubnet,
}

#[derive(Debug, Default)]
pub struct ResourceIndex {
    pub vnets: Vec<AzureVirtualNetwork>,
    pub nics: Vec<AzureNetworkInterface>,
    pub nsgs: Vec<AzureNetworkSecurityGroup>,
    pub public_ips: Vec<AzurePublicIp>,
    by_id: FxHashMap<String, Location>,
}

impl ResourceIndex {
    pub fn new(resources: Vec<AzureResource>) -> Self {
        let mut index = Self::default();
        for resource in resources {
            match resource {
                AzureResource::VirtualNetwork(vnet) => {
                    let v = index.vnets.len();
                    index.insert(&vnet.id, Location::VirtualNetwork(v));
                    for (s, subnet) in vnet.properties.subnets.iter().enumerate() {
                        index.insert(&subnet.id, Location::Subnet { vnet: v, subnet: s });
                    }
                    index.vnets.push(vnet);
                }
                AzureResource::NetworkInterface(nic) => {
                    let n = index.nics.len();
                    index.insert(&nic.id, Location::NetworkInterface(n));
                    for (c, config) in nic.properties.ip_configurations.iter().enumerate() {
                        index.insert(&config.id, Location::IpConfiguration { nic: n, config: c });
                    }
                    index.nics.push(nic);
                }
                AzureResource::NetworkSecurityGroup(nsg) => {
                    let g = index.nsgs.len();
                    index.insert(&nsg.id, Location::NetworkSecurityGroup(g));
                    for rule in nsg
                        .properties
                        .security_rules
                        .iter()
                        .chain(&nsg.properties.default_security_rules)
                    {
                        index.insert(&rule.id, Location::SecurityRule(g));
                    }
                    index.nsgs.push(nsg);
                }
                AzureResource::PublicIp(pip) => {
                    let p = index.public_ips.len();
                    index.insert(&pip.id, Location::PublicIp(p));
                    index.public_ips.push(pip);
                }
            }
        }
        index
    }

    fn insert(&mut self, id: &str, location: Location) {
        self.by_id.insert(id.to_ascii_lowercase(), location);
    }

    /// Every id known to the index.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vnets
            .iter()
            .flat_map(|v| std::iter::once(v.id.as_str()).chain(v.properties.subnets.iter().map(|s| s.id.as_str())))
            .chain(self.nics.iter().flat_map(|n| {
                std::iter::once(n.id.as_str())
                    .chain(n.properties.ip_configurations.iter().map(|c| c.id.as_str()))
            }))
            .chain(self.nsgs.iter().flat_map(|g| {
                std::iter::once(g.id.as_str()).chain(
                    g.properties
                        .security_rules
                        .iter()
                        .chain(&g.properties.default_security_rules)
                        .map(|r| r.id.as_str()),
                )
            }))
            .chain(self.public_ips.iter().map(|p| p.id.as_str()))
    }

    fn locate(&self, reference: &AzureReference) -> Result<Location, ConvertError> {
        self.by_id
            .get(&reference.id.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| ConvertError::UnresolvedReference {
                id: reference.id.clone(),
            })
    }

    fn wrong_kind(reference: &AzureReference, location: Location) -> ConvertError {
        ConvertError::UnsupportedResource {
            kind: location.kind().to_string(),
            id: reference.id.clone(),
        }
    }

    pub fn subnet(&self, reference: &AzureReference) -> Result<SubnetRef<'_>, ConvertError> {
        match self.locate(reference)? {
            Location::Subnet { vnet, subnet } => {
                let vnet = &self.vnets[vnet];
                Ok(SubnetRef {
                    vnet,
                    subnet: &vnet.properties.subnets[subnet],
                })
            }
            other => Err(Self::wrong_kind(reference, other)),
        }
    }

    pub fn network_security_group(
        &self,
        reference: &AzureReference,
    ) -> Result<&AzureNetworkSecurityGroup, ConvertError> {
        match self.locate(reference)? {
            Location::NetworkSecurityGroup(g) => Ok(&self.nsgs[g]),
            other => Err(Self::wrong_kind(reference, other)),
        }
    }

    /// Dereference the target of a public IP binding. Only NIC IP
    /// configurations are supported; load balancer front ends and other
    /// bindings fail.
    pub fn ip_configuration(&self, reference: &AzureReference) -> Result<IpConfigurationRef<'_>, ConvertError> {
        let location = match self.locate(reference) {
            Ok(location) => location,
            Err(e) => {
                return match bound_kind(&reference.id) {
                    Some(kind) => Err(ConvertError::UnsupportedResource {
                        kind,
                        id: reference.id.clone(),
                    }),
                    None => Err(e),
                };
            }
        };
        match location {
            Location::IpConfiguration { nic, config } => {
                let nic = &self.nics[nic];
                Ok(IpConfigurationRef {
                    nic,
                    config: &nic.properties.ip_configurations[config],
                })
            }
            other => Err(Self::wrong_kind(reference, other)),
        }
    }
}

/// The resource type of a binding target that is not a NIC IP
/// configuration, e.g. `microsoft.network/loadbalancers/frontendipconfigurations`.
fn bound_kind(id: &str) -> Option<String> {
    let lower = id.to_ascii_lowercase();
    let (_, tail) = lower.split_once("/providers/")?;
    let parts: Vec<&str> = tail.split('/').collect();
    let namespace = parts.first()?;
    let types: Vec<&str> = parts.iter().skip(1).step_by(2).copied().collect();
    if types.first() == Some(&"networkinterfaces") {
        return None;
    }
    Some(format!("{namespace}/{}", types.join("/")))
}
