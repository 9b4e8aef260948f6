//! Option sets derived from a driving field.
//!
//! The form recomputes these whenever the driving selection changes:
//!
//! - the node size bounds how many data disks can be attached
//! - the disk type decides the displayed IOPS and whether the storage
//!   account prefix is needed
//!
//! Everything here is a pure function of a catalog and the selected value.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{
    data::{MachineSizeCatalog, StorageTierCatalog},
    error::CatalogError,
};

/// Fewest data disks a node may attach.
pub const MIN_DATA_DISKS: u32 = 2;

/// Hard ceiling on data disks, regardless of machine size.
pub const MAX_DATA_DISKS: u32 = 40;

/// Disk type key that selects unmanaged standard storage.
///
/// Checked before any catalog lookup, so a catalog entry with the same key
/// is never consulted.
pub const UNMANAGED_STANDARD: &str = "unmanaged-standard";

/// IOPS reported for unmanaged standard storage.
pub const UNMANAGED_IOPS: u32 = 500;

/// Inclusive range of selectable data-disk counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataDiskRange {
    pub min: u32,
    pub max: u32,
}

impl DataDiskRange {
    /// Selectable counts, ascending.
    pub fn options(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }

    /// The count selected after the range is regenerated.
    pub fn default_selection(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, count: i64) -> bool {
        count >= i64::from(self.min) && count <= i64::from(self.max)
    }
}

/// Data disk range for a machine size.
///
/// Unknown sizes and sizes without a disk allowance get the minimum of two
/// disks. The upper bound is clamped to `[MIN_DATA_DISKS, MAX_DATA_DISKS]`.
pub fn data_disk_range(sizes: &MachineSizeCatalog, size_name: &str) -> DataDiskRange {
    let max = match sizes.get(size_name) {
        Some(size) if size.disks > 0 => size.disks,
        _ => MIN_DATA_DISKS,
    };

    DataDiskRange {
        min: MIN_DATA_DISKS,
        max: max.clamp(MIN_DATA_DISKS, MAX_DATA_DISKS),
    }
}

/// How a disk type is provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Managed,
    Unmanaged,
}

/// Presentation effects of selecting a disk type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageTierEffects {
    pub kind: StorageKind,
    pub iops: u32,
    /// Whether the storage account prefix field must be shown.
    pub requires_prefix: bool,
}

/// Effects of selecting `tier_key` as the disk type.
pub fn storage_tier_effects(
    tiers: &StorageTierCatalog,
    tier_key: &str,
) -> Result<StorageTierEffects, CatalogError> {
    if tier_key == UNMANAGED_STANDARD {
        return Ok(StorageTierEffects {
            kind: StorageKind::Unmanaged,
            iops: UNMANAGED_IOPS,
            requires_prefix: true,
        });
    }

    let tier = tiers
        .get(tier_key)
        .ok_or_else(|| CatalogError::UnknownStorageTier(tier_key.to_string()))?;

    Ok(StorageTierEffects {
        kind: StorageKind::Managed,
        iops: tier.iops,
        requires_prefix: false,
    })
}

/// Node size choices, in catalog order.
pub fn node_size_options(sizes: &MachineSizeCatalog) -> Vec<String> {
    sizes.names().map(str::to_string).collect()
}

/// A selectable managed disk tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierOption {
    pub key: String,
    pub label: String,
}

/// Managed disk choices with their display labels.
pub fn storage_tier_options(tiers: &StorageTierCatalog) -> Vec<TierOption> {
    tiers
        .iter()
        .map(|(key, tier)| TierOption {
            key: key.to_string(),
            label: tier.to_string(),
        })
        .collect()
}
