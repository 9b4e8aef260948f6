//! Static reference tables used to bound form values.
//!
//! Two catalogs drive the form:
//!
//! - [`MachineSizeCatalog`] - virtual machine sizes and how many data disks
//!   each can attach
//! - [`StorageTierCatalog`] - managed disk offerings with their SKU, tier,
//!   capacity and IOPS
//!
//! A copy of both ships with the crate. Either can be swapped for a JSON file
//! on disk with [`Catalogs::load`].

use std::{fs, path::Path};

use log::info;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;

/// Machine size catalog.
pub mod machine;

/// Managed storage catalog.
pub mod storage;

pub use machine::{MachineSize, MachineSizeCatalog};
pub use storage::{StorageTier, StorageTierCatalog, Tier};

const BUILTIN_VM_SIZES: &str = include_str!("../../data/azure-vm-sizes.json");
const BUILTIN_MANAGED_DISKS: &str = include_str!("../../data/azure-managed-disks.json");

/// The pair of read-only catalogs shared by the resolver and the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub sizes: MachineSizeCatalog,
    pub tiers: StorageTierCatalog,
}

impl Catalogs {
    pub fn new(sizes: MachineSizeCatalog, tiers: StorageTierCatalog) -> Self {
        Self { sizes, tiers }
    }

    /// Parse the catalogs bundled with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self {
            sizes: parse("vm size", BUILTIN_VM_SIZES)?,
            tiers: parse("managed disk", BUILTIN_MANAGED_DISKS)?,
        })
    }

    /// Load catalogs from JSON files, using the bundled table for any path
    /// that is `None`.
    pub fn load(
        vm_sizes: Option<impl AsRef<Path>>,
        managed_disks: Option<impl AsRef<Path>>,
    ) -> Result<Self, CatalogError> {
        let sizes: MachineSizeCatalog = match vm_sizes {
            Some(path) => read("vm size", path.as_ref())?,
            None => parse("vm size", BUILTIN_VM_SIZES)?,
        };
        let tiers: StorageTierCatalog = match managed_disks {
            Some(path) => read("managed disk", path.as_ref())?,
            None => parse("managed disk", BUILTIN_MANAGED_DISKS)?,
        };

        info!(
            "Loaded {} machine sizes and {} managed disk tiers",
            sizes.len(),
            tiers.len()
        );
        Ok(Self { sizes, tiers })
    }
}

fn parse<T: DeserializeOwned>(name: &'static str, content: &str) -> Result<T, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::Parse { name, source })
}

fn read<T: DeserializeOwned>(name: &'static str, path: &Path) -> Result<T, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(name, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_parse() {
        let catalogs = Catalogs::builtin().unwrap();
        assert!(!catalogs.sizes.is_empty());
        assert!(!catalogs.tiers.is_empty());
        assert_eq!(catalogs.sizes.get("Standard_D2_v2").unwrap().disks, 8);
        assert_eq!(catalogs.tiers.get("premium-p30").unwrap().iops, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizes.json");
        fs::write(&path, r#"{ "Standard_D2": { "disks": 4 } }"#).unwrap();

        let catalogs = Catalogs::load(Some(&path), None::<&Path>).unwrap();
        assert_eq!(catalogs.sizes.len(), 1);
        assert_eq!(catalogs.sizes.get("Standard_D2"), Some(&MachineSize::with_disks(4)));
        assert_eq!(catalogs.tiers, Catalogs::builtin().unwrap().tiers);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = Catalogs::load(Some(&missing), None::<&Path>).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let err = Catalogs::load(None::<&Path>, Some(&broken)).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { name: "managed disk", .. }));
    }
}
