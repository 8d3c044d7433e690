//! The canned `hostconfigs` document served on every request.
//!
//! Field declaration order is the serialization order, which matches the
//! layout the controller's restconf endpoint returns.

use std::collections::BTreeMap;

use anyhow::Context;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfigFixture {
    pub hostconfigs: HostConfigs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfigs {
    pub hostconfig: Vec<HostConfigEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfigEntry {
    #[serde(rename = "host-id")]
    pub host_id: String,
    #[serde(rename = "host-type")]
    pub host_type: String,
    pub config: HostConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    pub supported_vnic_types: Vec<VnicType>,
    pub allowed_network_types: Vec<String>,
    /// physical network name -> OVS bridge name
    pub bridge_mappings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnicType {
    pub vnic_type: String,
    pub vif_type: String,
    pub vif_details: Map<String, Value>,
}

impl HostConfigFixture {
    /// Single devstack host running the ODL L2 agent with OVS.
    pub fn devstack() -> Self {
        let config = HostConfig {
            supported_vnic_types: vec![VnicType {
                vnic_type: "normal".to_string(),
                vif_type: "ovs".to_string(),
                vif_details: Map::new(),
            }],
            allowed_network_types: ["local", "vlan", "vxlan", "gre"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bridge_mappings: BTreeMap::from([("physnet1".to_string(), "br-ex".to_string())]),
        };

        Self {
            hostconfigs: HostConfigs {
                hostconfig: vec![HostConfigEntry {
                    host_id: "devstack".to_string(),
                    host_type: "ODL L2".to_string(),
                    config,
                }],
            },
        }
    }

    /// Serializes once into the body shared by every connection.
    pub fn to_json(&self) -> anyhow::Result<Bytes> {
        let body = serde_json::to_vec(self).context("failed to serialize hostconfig fixture")?;
        Ok(Bytes::from(body))
    }
}

impl Default for HostConfigFixture {
    fn default() -> Self {
        Self::devstack()
    }
}
