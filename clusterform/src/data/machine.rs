use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One virtual machine size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSize {
    /// Maximum number of attachable data disks, 0 when the table omits it.
    #[serde(default)]
    pub disks: u32,
    /// Number of vCPUs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    /// Memory in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,
}

impl MachineSize {
    pub fn with_disks(disks: u32) -> Self {
        Self {
            disks,
            cores: None,
            memory: None,
        }
    }
}

/// Machine sizes keyed by size name, e.g. `Standard_D2_v2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineSizeCatalog(BTreeMap<String, MachineSize>);

impl MachineSizeCatalog {
    pub fn get(&self, name: &str) -> Option<&MachineSize> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Size names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MachineSize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, MachineSize)> for MachineSizeCatalog {
    fn from_iter<T: IntoIterator<Item = (K, MachineSize)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
