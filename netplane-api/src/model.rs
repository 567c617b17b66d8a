//! Network resource model.
//!
//! `NetworkSpec` is the client-supplied intent; `Network` is what the store
//! persists once a spec has been accepted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Descriptive metadata attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Annotations {
    /// Display name (not required to be unique)
    #[serde(default)]
    pub name: String,
    /// Free-form labels
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

/// A named driver plus its options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Driver {
    pub name: String,
    #[serde(default)]
    pub options: HashMap<String, String>,
}

/// One IPAM pool: a subnet with an optional allocation range and gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IpamConfiguration {
    /// Subnet in CIDR notation (e.g., "10.0.0.0/24")
    #[serde(default)]
    pub subnet: String,
    /// Allocation range in CIDR notation; empty means the whole subnet
    #[serde(default)]
    pub range: String,
    /// Gateway address; empty lets the driver choose
    #[serde(default)]
    pub gateway: String,
}

/// IP address management options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IpamOptions {
    /// IPAM driver; absent means the default driver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
    #[serde(default)]
    pub configurations: Vec<IpamConfiguration>,
}

/// Desired state of a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NetworkSpec {
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_configuration: Option<Driver>,
    /// IPAM options; absent means the system picks defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipam: Option<IpamOptions>,
}

/// A persisted network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Network {
    pub id: String,
    pub spec: NetworkSpec,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl Network {
    pub fn name(&self) -> &str {
        &self.spec.annotations.name
    }
}
