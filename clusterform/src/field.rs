use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldSetError;

/// A form field known to the validator.
///
/// Each variant carries the id the form uses for it, which is also the key
/// expected in a [`RawFields`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    /// Number of cluster nodes (ARM).
    NodeCount,
    /// Machine size of every node (ARM).
    NodeSize,
    /// Number of attached data disks per node (ARM).
    DataDisks,
    /// Storage account name prefix (ARM).
    StorageAccountPrefix,
    /// Public SSH key of the admin user (ARM).
    SshKey,
    /// Admin user name (ARM).
    AdminUsername,
    /// Managed disk tier or the unmanaged sentinel (ARM).
    DiskType,
    /// vCPU count of the host (cloud-config).
    VcpuCount,
    /// Number of etcd2 cluster members (cloud-config).
    EtcdNodeCount,
    /// etcd discovery URL (every mode).
    #[serde(rename = "etcd-discovery-url")]
    DiscoveryUrl,
}

impl Field {
    /// Every field, in validation order.
    pub const ALL: [Field; 10] = [
        Field::NodeCount,
        Field::NodeSize,
        Field::DataDisks,
        Field::StorageAccountPrefix,
        Field::SshKey,
        Field::AdminUsername,
        Field::DiskType,
        Field::VcpuCount,
        Field::EtcdNodeCount,
        Field::DiscoveryUrl,
    ];

    /// Form id of the field.
    pub fn id(self) -> &'static str {
        match self {
            Field::NodeCount => "node-count",
            Field::NodeSize => "node-size",
            Field::DataDisks => "data-disks",
            Field::StorageAccountPrefix => "storage-account-prefix",
            Field::SshKey => "ssh-key",
            Field::AdminUsername => "admin-username",
            Field::DiskType => "disk-type",
            Field::VcpuCount => "vcpu-count",
            Field::EtcdNodeCount => "etcd-node-count",
            Field::DiscoveryUrl => "etcd-discovery-url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a string is not a known field id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Raw, user-entered form values keyed by field id.
///
/// Values are kept exactly as entered; trimming and parsing happen during
/// validation. Keys that do not name a [`Field`] are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of `field`, or the empty string when it was not supplied.
    pub fn get(&self, field: Field) -> &str {
        self.0.get(field.id()).map(String::as_str).unwrap_or("")
    }

    /// Set the raw value of `field`, returning the previous one.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.id().to_string(), value.into())
    }

    /// Set a raw value by key, known field or not.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Iterate over all `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a field set from a JSON object.
    ///
    /// Strings are taken as-is; numbers and booleans are stringified so that
    /// TOML or JSON inputs like `node-count = 3` behave like typed-in text.
    pub fn from_value(value: &Value) -> Result<Self, FieldSetError> {
        let Value::Object(map) = value else {
            return Err(FieldSetError::NotAnObject(value.to_string()));
        };

        let mut fields = RawFields::new();
        for (key, item) in map {
            let raw = match item {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(FieldSetError::NotAScalar {
                        key: key.clone(),
                        actual: item.to_string(),
                    });
                }
            };
            fields.insert(key.clone(), raw);
        }
        Ok(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
