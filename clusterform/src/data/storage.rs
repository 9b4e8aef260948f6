use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Performance tier of a managed disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Standard,
    Premium,
}

impl Tier {
    /// Word used for the tier in option labels.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Standard => "Standard",
            Tier::Premium => "Premium",
        }
    }
}

/// One managed disk offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTier {
    /// Azure SKU name, e.g. `P10`.
    pub sku: String,
    #[serde(rename = "type")]
    pub tier: Tier,
    /// Capacity in GB.
    #[serde(rename = "size")]
    pub capacity_gb: u32,
    /// Provisioned IOPS.
    pub iops: u32,
}

/// Formats the option label, e.g. `P10 Premium (128 GB)`.
impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({} GB)", self.sku, self.tier.label(), self.capacity_gb)
    }
}

/// Managed disk offerings keyed by tier key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageTierCatalog(BTreeMap<String, StorageTier>);

impl StorageTierCatalog {
    pub fn get(&self, key: &str) -> Option<&StorageTier> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StorageTier)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, StorageTier)> for StorageTierCatalog {
    fn from_iter<T: IntoIterator<Item = (K, StorageTier)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
