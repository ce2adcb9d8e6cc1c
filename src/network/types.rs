//! Structured arguments for the operations whose parameter lists are too long, or too open
//! ended, to pass one by one.

use bon::Builder;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Options for `create_networks`.
///
/// Only the fields that are set are sent; the network manager applies its own defaults for the
/// rest.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize)]
pub struct CreateNetworksRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// IPv4 range to carve the networks from, e.g. `10.0.0.0/16`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_host: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_networks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr_v6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_v6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpn_start: Option<u32>,
    /// Subrange of `cidr` used for fixed IPs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// A network an instance asks to be attached to, optionally with a fixed address.
///
/// Sent as the pair `[network_uuid, address]`, with `null` when no address is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedNetwork {
    pub network_uuid: String,
    pub address: Option<String>,
}

impl RequestedNetwork {
    pub fn new(network_uuid: impl Into<String>) -> Self {
        Self {
            network_uuid: network_uuid.into(),
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<&RequestedNetwork> for Value {
    fn from(network: &RequestedNetwork) -> Self {
        Value::Array(vec![
            Value::from(network.network_uuid.as_str()),
            Value::from(network.address.as_deref()),
        ])
    }
}

impl Serialize for RequestedNetwork {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.network_uuid, &self.address).serialize(serializer)
    }
}

pub(crate) fn requested_networks_value(networks: &[RequestedNetwork]) -> Value {
    Value::Array(networks.iter().map(Value::from).collect())
}

/// A change to one side of a network's association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// Associate with the given host or project.
    Set(String),
    /// Drop the current association.
    Clear,
}

impl From<&Association> for Value {
    fn from(association: &Association) -> Self {
        match association {
            Association::Set(target) => Value::from(target.as_str()),
            Association::Clear => Value::Null,
        }
    }
}

/// The associations to change with `associate`.
///
/// Sides left as `None` are not touched by the network manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct NetworkAssociations {
    pub host: Option<Association>,
    pub project: Option<Association>,
}

impl From<&NetworkAssociations> for Value {
    fn from(associations: &NetworkAssociations) -> Self {
        let mut map = Map::new();
        if let Some(host) = &associations.host {
            map.insert("host".to_string(), Value::from(host));
        }
        if let Some(project) = &associations.project {
            map.insert("project".to_string(), Value::from(project));
        }
        Value::Object(map)
    }
}

/// Arguments for `allocate_for_instance`.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct InstanceAllocation {
    pub instance_id: i64,
    pub instance_uuid: String,
    pub project_id: String,
    pub host: String,
    pub rxtx_factor: f64,
    #[builder(default)]
    pub vpn: bool,
    /// `None` lets the manager pick the project's networks.
    pub requested_networks: Option<Vec<RequestedNetwork>>,
}

/// Arguments for `migrate_instance_start` and `migrate_instance_finish`.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(on(String, into))]
pub struct InstanceMigration {
    pub instance_uuid: String,
    pub rxtx_factor: f64,
    pub project_id: String,
    pub source_compute: String,
    pub dest_compute: String,
    #[builder(default)]
    pub floating_addresses: Vec<String>,
    /// Network host to run the migration step on. `None` sends it to any network manager.
    pub host: Option<String>,
}
