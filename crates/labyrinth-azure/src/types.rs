//! Serde model of the Azure Resource Graph resources the converter understands.
//!
//! Only the fields that affect routing are modelled. Every resource kind is a
//! closed variant of [`AzureResource`]; unknown network resource types are
//! rejected at parse time.

use labyrinth_core::errors::ConvertError;
use serde::Deserialize;

pub const VIRTUAL_NETWORK: &str = "microsoft.network/virtualnetworks";
pub const NETWORK_INTERFACE: &str = "microsoft.network/networkinterfaces";
pub const NETWORK_SECURITY_GROUP: &str = "microsoft.network/networksecuritygroups";
pub const PUBLIC_IP_ADDRESS: &str = "microsoft.network/publicipaddresses";
const NETWORK_NAMESPACE: &str = "microsoft.network/";

/// A pointer to another resource by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AzureReference {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureVirtualNetwork {
    pub id: String,
    pub name: String,
    pub properties: VirtualNetworkProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkProperties {
    pub address_space: AddressSpace,
    #[serde(default)]
    pub subnets: Vec<AzureSubnet>,
    #[serde(default)]
    pub virtual_network_peerings: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    pub address_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureSubnet {
    pub id: String,
    pub name: String,
    pub properties: SubnetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetProperties {
    pub address_prefix: String,
    #[serde(default)]
    pub network_security_group: Option<AzureReference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureNetworkInterface {
    pub id: String,
    pub name: String,
    pub properties: NetworkInterfaceProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    #[serde(default)]
    pub ip_configurations: Vec<AzureIpConfiguration>,
    #[serde(default)]
    pub network_security_group: Option<AzureReference>,
}

/// A private address bound to a network interface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureIpConfiguration {
    pub id: String,
    pub name: String,
    pub properties: IpConfigurationProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpConfigurationProperties {
    #[serde(rename = "privateIPAddress")]
    pub private_ip_address: String,
    #[serde(default)]
    pub subnet: Option<AzureReference>,
    #[serde(default, rename = "publicIPAddress")]
    pub public_ip_address: Option<AzureReference>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureNetworkSecurityGroup {
    pub id: String,
    pub name: String,
    pub properties: NetworkSecurityGroupProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSecurityGroupProperties {
    #[serde(default)]
    pub security_rules: Vec<AzureSecurityRule>,
    #[serde(default)]
    pub default_security_rules: Vec<AzureSecurityRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureSecurityRule {
    pub id: String,
    pub name: String,
    pub properties: SecurityRuleProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Access {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RuleDirection {
    Inbound,
    Outbound,
}

/// Azure writes a single value or a list, never both; the empty one is
/// absent or an empty string.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRuleProperties {
    pub access: Access,
    pub direction: RuleDirection,
    pub priority: u32,
    pub protocol: String,
    #[serde(default)]
    pub source_address_prefix: Option<String>,
    #[serde(default)]
    pub source_address_prefixes: Vec<String>,
    #[serde(default)]
    pub source_port_range: Option<String>,
    #[serde(default)]
    pub source_port_ranges: Vec<String>,
    #[serde(default)]
    pub destination_address_prefix: Option<String>,
    #[serde(default)]
    pub destination_address_prefixes: Vec<String>,
    #[serde(default)]
    pub destination_port_range: Option<String>,
    #[serde(default)]
    pub destination_port_ranges: Vec<String>,
}

impl SecurityRuleProperties {
    pub fn source_addresses(&self) -> Vec<&str> {
        one_or_many(&self.source_address_prefix, &self.source_address_prefixes)
    }

    pub fn source_ports(&self) -> Vec<&str> {
        one_or_many(&self.source_port_range, &self.source_port_ranges)
    }

    pub fn destination_addresses(&self) -> Vec<&str> {
        one_or_many(&self.destination_address_prefix, &self.destination_address_prefixes)
    }

    pub fn destination_ports(&self) -> Vec<&str> {
        one_or_many(&self.destination_port_range, &self.destination_port_ranges)
    }
}

fn one_or_many<'a>(single: &'a Option<String>, many: &'a [String]) -> Vec<&'a str> {
    match single.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => vec![value],
        _ => many.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzurePublicIp {
    pub id: String,
    pub name: String,
    pub properties: PublicIpProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpProperties {
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub ip_configuration: Option<AzureReference>,
}

/// A top-level entry of the resource graph.
#[derive(Debug, Clone)]
pub enum AzureResource {
    VirtualNetwork(AzureVirtualNetwork),
    NetworkInterface(AzureNetworkInterface),
    NetworkSecurityGroup(AzureNetworkSecurityGroup),
    PublicIp(AzurePublicIp),
}

/// Common header shared by every resource-graph entry.
#[derive(Debug, Deserialize)]
struct Header {
    #[serde(default)]
    id: String,
    #[serde(rename = "type")]
    kind: String,
}

impl AzureResource {
    /// Classify one resource-graph entry. `Ok(None)` means the resource does
    /// not take part in routing.
    pub fn parse(value: &serde_json::Value) -> Result<Option<Self>, ConvertError> {
        let header: Header = serde_json::from_value(value.clone())?;
        let kind = header.kind.to_ascii_lowercase();

        let resource = match kind.as_str() {
            VIRTUAL_NETWORK => Self::VirtualNetwork(typed(value, &header.id)?),
            NETWORK_INTERFACE => Self::NetworkInterface(typed(value, &header.id)?),
            NETWORK_SECURITY_GROUP => Self::NetworkSecurityGroup(typed(value, &header.id)?),
            PUBLIC_IP_ADDRESS => Self::PublicIp(typed(value, &header.id)?),
            other if other.starts_with(NETWORK_NAMESPACE) => {
                return Err(ConvertError::UnsupportedResource {
                    kind: header.kind,
                    id: header.id,
                });
            }
            _ => return Ok(None),
        };
        Ok(Some(resource))
    }

    pub fn id(&self) -> &str {
        match self {
            Self::VirtualNetwork(r) => &r.id,
            Self::NetworkInterface(r) => &r.id,
            Self::NetworkSecurityGroup(r) => &r.id,
            Self::PublicIp(r) => &r.id,
        }
    }
}

fn typed<T: serde::de::DeserializeOwned>(value: &serde_json::Value, id: &str) -> Result<T, ConvertError> {
    serde_json::from_value(value.clone()).map_err(|e| ConvertError::MalformedResource {
        id: id.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_dispatch_is_case_insensitive() {
        let value = json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/publicIPAddresses/pip1",
            "name": "pip1",
            "type": "Microsoft.Network/publicIPAddresses",
            "properties": { "ipAddress": "52.1.2.3" }
        });
        let resource = AzureResource::parse(&value).unwrap().unwrap();
        assert!(matches!(resource, AzureResource::PublicIp(ref p) if p.properties.ip_address.as_deref() == Some("52.1.2.3")));
    }

    #[test]
    fn test_unknown_network_type_rejected() {
        let value = json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb",
            "name": "lb",
            "type": "microsoft.network/loadbalancers",
        });
        let err = AzureResource::parse(&value).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedResource { ref kind, .. } if kind == "microsoft.network/loadbalancers"));
    }

    #[test]
    fn test_non_network_resource_skipped() {
        let value = json!({"id": "x", "name": "vm", "type": "microsoft.compute/virtualmachines"});
        assert!(AzureResource::parse(&value).unwrap().is_none());
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let value = json!({"id": "v", "name": "v", "type": "microsoft.network/virtualnetworks", "properties": {}});
        let err = AzureResource::parse(&value).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedResource { ref id, .. } if id == "v"));
    }

    #[test]
    fn test_single_value_wins_over_empty_list() {
        let props: SecurityRuleProperties = serde_json::from_value(json!({
            "access": "Allow",
            "direction": "Inbound",
            "priority": 100,
            "protocol": "Tcp",
            "destinationPortRange": "",
            "destinationPortRanges": ["80", "443"],
            "sourceAddressPrefix": "*",
            "sourceAddressPrefixes": []
        }))
        .unwrap();
        assert_eq!(props.destination_ports(), vec!["80", "443"]);
        assert_eq!(props.source_addresses(), vec!["*"]);
        assert!(props.source_ports().is_empty());
    }
}
