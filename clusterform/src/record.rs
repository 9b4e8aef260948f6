//! The normalized configuration handed to the template generator.
//!
//! # Format
//!
//! ```json
//! {
//!   "mode": "cloudconfig",
//!   "vcpu_count": 4,
//!   "etcd_node_count": 3,
//!   "discovery_url": null
//! }
//! ```
//!
//! A `null` discovery URL asks the generator to create a fresh one.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Validated form values for one mode.
///
/// Only produced when every field applicable to the mode passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ConfigurationRecord {
    /// Azure Resource Manager template for a full cluster.
    Arm {
        #[serde(flatten)]
        settings: ArmSettings,
        /// etcd discovery URL, `None` to auto-generate.
        discovery_url: Option<String>,
    },
    /// cloud-config for a single host joining an etcd2 cluster.
    CloudConfig {
        #[serde(flatten)]
        settings: CloudConfigSettings,
        /// etcd discovery URL, `None` to auto-generate.
        discovery_url: Option<String>,
    },
    /// No recognized mode was selected; only mode-independent fields.
    #[serde(rename = "none")]
    ModeIndependent {
        /// The mode tag that was selected, if any.
        tag: Option<String>,
        /// etcd discovery URL, `None` to auto-generate.
        discovery_url: Option<String>,
    },
}

impl ConfigurationRecord {
    /// The mode this record was validated for.
    pub fn mode(&self) -> Mode {
        match self {
            ConfigurationRecord::Arm { .. } => Mode::Arm,
            ConfigurationRecord::CloudConfig { .. } => Mode::CloudConfig,
            ConfigurationRecord::ModeIndependent { tag, .. } => match tag {
                Some(tag) => Mode::from_tag(tag),
                None => Mode::Unselected,
            },
        }
    }

    pub fn discovery_url(&self) -> Option<&str> {
        match self {
            ConfigurationRecord::Arm { discovery_url, .. }
            | ConfigurationRecord::CloudConfig { discovery_url, .. }
            | ConfigurationRecord::ModeIndependent { discovery_url, .. } => {
                discovery_url.as_deref()
            }
        }
    }

    /// Whether the generator should create a discovery URL.
    pub fn auto_generate_discovery(&self) -> bool {
        self.discovery_url().is_none()
    }
}

/// Cluster settings for the ARM template mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArmSettings {
    /// Number of nodes, 3 or 5.
    pub node_count: u32,
    /// Machine size name from the size catalog.
    pub node_size: String,
    /// Data disks attached to each node.
    pub data_disks: u32,
    pub storage_account_prefix: String,
    pub ssh_key: String,
    pub admin_username: String,
    /// Disk type selection as entered, when one was made. Not checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
}

/// Host settings for the cloud-config mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CloudConfigSettings {
    pub vcpu_count: u32,
    /// Size of the etcd2 cluster the host joins.
    pub etcd_node_count: u64,
}
