//! Application context and state management.
//!
//! [`AppContext`] ties the loaded configuration to a [`FormContext`] built
//! from the configured catalogs. The command handlers work through it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clusterform::{Catalogs, ConfigurationRecord, FieldError, FormContext, RawFields};

use crate::config::GeneratorConfig;

/// The main application context holding all state.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Working directory the command was started in.
    pub workdir: PathBuf,
    /// Loaded generator configuration.
    pub config: GeneratorConfig,
    /// Form state: catalogs and selected mode.
    pub form: FormContext,
}

impl AppContext {
    /// Build the context from an optional configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or a catalog cannot be loaded.
    pub fn new(config_path: Option<&Path>, workdir: PathBuf) -> anyhow::Result<Self> {
        let config = GeneratorConfig::load(config_path, &workdir)?;
        let catalogs = Catalogs::load(
            config.catalog.vm_sizes.as_ref(),
            config.catalog.managed_disks.as_ref(),
        )
        .context("Failed to load catalogs")?;

        Ok(Self {
            workdir,
            config,
            form: FormContext::new(catalogs),
        })
    }

    /// Build the context from already loaded parts.
    pub fn with_catalogs(config: GeneratorConfig, catalogs: Catalogs, workdir: PathBuf) -> Self {
        Self {
            workdir,
            config,
            form: FormContext::new(catalogs),
        }
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.form.catalogs()
    }

    /// Select `mode` and validate `raw` against it.
    pub fn submit(&mut self, mode: &str, raw: &RawFields) -> Result<ConfigurationRecord, FieldError> {
        self.form.set_mode(mode);
        self.form.submit(raw)
    }

    /// Resolve `path` against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterform::{Field, Mode};

    #[test]
    fn test_new_with_catalog_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sizes.json"),
            r#"{ "Standard_D2": { "disks": 4 } }"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(crate::config::DEFAULT_CONFIG_NAME),
            "[catalog]\nvm_sizes = \"sizes.json\"\n",
        )
        .unwrap();

        let ctx = AppContext::new(None, dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.catalogs().sizes.len(), 1);
        assert!(!ctx.catalogs().tiers.is_empty());
        assert_eq!(ctx.form.mode(), &Mode::Unselected);
    }

    #[test]
    fn test_submit_sets_mode() {
        let mut ctx = AppContext::with_catalogs(
            GeneratorConfig::default(),
            Catalogs::builtin().unwrap(),
            PathBuf::from("."),
        );
        let raw: RawFields = [("vcpu-count", "64"), ("etcd-node-count", "3")]
            .into_iter()
            .collect();
        let err = ctx.submit("cloudconfig", &raw).unwrap_err();
        assert_eq!(err.field, Field::VcpuCount);
        assert_eq!(ctx.form.mode(), &Mode::CloudConfig);
    }
}
