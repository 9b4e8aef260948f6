//! Mode selection and the form context.
//!
//! The [`Mode`] decides which fields are applicable. [`FormContext`] holds the
//! current mode next to the catalogs and is what a presentation layer talks
//! to: it selects the mode, asks for derived options when a driving field
//! changes, and submits the raw values.

use std::{convert::Infallible, fmt, str::FromStr};

use log::debug;

use crate::{
    data::Catalogs,
    error::{CatalogError, FieldError},
    field::{Field, RawFields},
    record::ConfigurationRecord,
    resolver::{self, DataDiskRange, StorageTierEffects},
    validate::validate,
};

/// Deployment flavor selected in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Nothing selected yet.
    #[default]
    Unselected,
    /// ARM template for a full cluster (`"arm"`).
    Arm,
    /// cloud-config for a single host (`"cloudconfig"`).
    CloudConfig,
    /// Any other tag. Only mode-independent fields apply.
    Unrecognized(String),
}

const ARM_FIELDS: &[Field] = &[
    Field::NodeCount,
    Field::NodeSize,
    Field::DataDisks,
    Field::StorageAccountPrefix,
    Field::SshKey,
    Field::AdminUsername,
    Field::DiscoveryUrl,
];

const CLOUD_CONFIG_FIELDS: &[Field] = &[
    Field::VcpuCount,
    Field::EtcdNodeCount,
    Field::DiscoveryUrl,
];

const COMMON_FIELDS: &[Field] = &[Field::DiscoveryUrl];

impl Mode {
    pub const ARM_TAG: &'static str = "arm";
    pub const CLOUD_CONFIG_TAG: &'static str = "cloudconfig";

    /// Interpret a mode tag. Every string is accepted.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::ARM_TAG => Mode::Arm,
            Self::CLOUD_CONFIG_TAG => Mode::CloudConfig,
            other => Mode::Unrecognized(other.to_string()),
        }
    }

    /// The tag of the mode, `None` when nothing is selected.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Mode::Unselected => None,
            Mode::Arm => Some(Self::ARM_TAG),
            Mode::CloudConfig => Some(Self::CLOUD_CONFIG_TAG),
            Mode::Unrecognized(tag) => Some(tag.as_str()),
        }
    }

    /// Fields validated in this mode, in validation order.
    pub fn applicable_fields(&self) -> &'static [Field] {
        match self {
            Mode::Arm => ARM_FIELDS,
            Mode::CloudConfig => CLOUD_CONFIG_FIELDS,
            Mode::Unselected | Mode::Unrecognized(_) => COMMON_FIELDS,
        }
    }

    pub fn is_applicable(&self, field: Field) -> bool {
        self.applicable_fields().contains(&field)
    }
}

impl FromStr for Mode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Mode::from_tag(s))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or("<none>"))
    }
}

/// Current mode plus the catalogs the form is bounded by.
#[derive(Debug, Clone)]
pub struct FormContext {
    catalogs: Catalogs,
    mode: Mode,
}

impl FormContext {
    /// New context with no mode selected.
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            catalogs,
            mode: Mode::Unselected,
        }
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Select a mode by tag.
    pub fn set_mode(&mut self, tag: &str) {
        let mode = Mode::from_tag(tag);
        debug!("form mode: {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    /// Fields the presentation layer should show and enable.
    pub fn applicable_fields(&self) -> &'static [Field] {
        self.mode.applicable_fields()
    }

    /// Data disk choices after the node size selection changed.
    pub fn on_size_changed(&self, size_name: &str) -> DataDiskRange {
        resolver::data_disk_range(&self.catalogs.sizes, size_name)
    }

    /// IOPS and prefix visibility after the disk type selection changed.
    pub fn on_tier_changed(&self, tier_key: &str) -> Result<StorageTierEffects, CatalogError> {
        resolver::storage_tier_effects(&self.catalogs.tiers, tier_key)
    }

    /// Validate `raw` for the current mode.
    pub fn submit(&self, raw: &RawFields) -> Result<ConfigurationRecord, FieldError> {
        validate(raw, &self.mode, &self.catalogs)
    }
}
