//! Generator configuration.
//!
//! Configuration is stored in `.clustergen.toml` files. Every section is
//! optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! [catalog]
//! vm_sizes = "azure-vm-sizes.json"
//! managed_disks = "azure-managed-disks.json"
//!
//! [output]
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = ".clustergen.toml";

/// Root configuration structure.
#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Catalog overrides.
    pub catalog: CatalogConfig,
    /// Record output settings.
    pub output: OutputConfig,
}

/// Paths of catalog files replacing the built-in tables.
///
/// Relative paths are resolved against the directory of the configuration
/// file.
#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Machine size catalog (JSON).
    pub vm_sizes: Option<PathBuf>,
    /// Managed disk catalog (JSON).
    pub managed_disks: Option<PathBuf>,
}

/// How validated records are written.
#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Serialization format of a validated record.
#[derive(
    Default, Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Pretty-printed TOML.
    Toml,
}

impl GeneratorConfig {
    /// Load the configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// file in `workdir` is used when present, otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>, workdir: &Path) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = workdir.join(DEFAULT_CONFIG_NAME);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_NAME} in {}, using defaults", workdir.display());
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: GeneratorConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let base = path.parent().unwrap_or(workdir);
        config.catalog.vm_sizes = config.catalog.vm_sizes.map(|p| base.join(p));
        config.catalog.managed_disks = config.catalog.managed_disks.map(|p| base.join(p));

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
