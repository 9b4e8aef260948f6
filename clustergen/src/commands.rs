//! Command handlers.
//!
//! Each handler plays the part of the form's presentation layer: it asks the
//! core for derived options or a validation result and prints it.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;
use clusterform::{
    Field, Mode, RawFields,
    record::ConfigurationRecord,
    resolver::{self, UNMANAGED_STANDARD},
};

use crate::{
    config::OutputFormat,
    ctx::AppContext,
    input::{parse_assignment, read_raw_fields, render},
};

/// Arguments of the `validate` command.
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Mode tag, e.g. `arm` or `cloudconfig`.
    pub mode: String,
    /// Form values file.
    pub input: Option<PathBuf>,
    /// `FIELD=VALUE` overrides applied after the file.
    pub set: Vec<String>,
    /// Output format, falling back to the configured one.
    pub format: Option<OutputFormat>,
    /// Write the record here instead of stdout.
    pub output: Option<PathBuf>,
}

/// Handler for all commands.
pub struct CommandHandler;

impl CommandHandler {
    /// Validate a form and print or write the record.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read, a field is rejected, or the
    /// output cannot be written.
    pub fn handle_validate(ctx: &mut AppContext, args: &ValidateArgs) -> Result<()> {
        let mut raw = match &args.input {
            Some(path) => read_raw_fields(&ctx.resolve(path))?,
            None => RawFields::new(),
        };
        for assignment in &args.set {
            let (field, value) = parse_assignment(assignment)?;
            raw.set(field, value);
        }

        let record = match ctx.submit(&args.mode, &raw) {
            Ok(record) => record,
            Err(e) => {
                eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
                bail!("field {} was rejected", e.field);
            }
        };

        let format = args.format.unwrap_or(ctx.config.output.format);
        let content = render(&record, format)?;

        match &args.output {
            Some(path) => {
                let path = ctx.resolve(path);
                std::fs::write(&path, content)?;
                println!(
                    "{} record written to {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
            None => println!("{content}"),
        }

        if let ConfigurationRecord::ModeIndependent { .. } = record {
            warn!("no recognized mode selected, only the discovery URL was checked");
        }
        Ok(())
    }

    /// List node sizes with their data disk ranges.
    pub fn handle_sizes(ctx: &AppContext) {
        let sizes = &ctx.catalogs().sizes;
        for name in resolver::node_size_options(sizes) {
            let range = resolver::data_disk_range(sizes, &name);
            println!("{:<20} data disks {}..={}", name, range.min, range.max);
        }
    }

    /// Print the data disk options for one size.
    pub fn handle_disks(ctx: &AppContext, size: &str) {
        let range = ctx.form.on_size_changed(size);
        if !ctx.catalogs().sizes.contains(size) {
            warn!("unknown machine size {size:?}, using the minimum allowance");
        }
        let options = range
            .options()
            .map(|n| {
                if n == range.default_selection() {
                    format!("[{n}]").bold().to_string()
                } else {
                    n.to_string()
                }
            })
            .collect::<Vec<_>>();
        println!("{}", options.join(" "));
    }

    /// List storage tier options.
    pub fn handle_tiers(ctx: &AppContext) {
        println!("{:<20} {}", UNMANAGED_STANDARD, "Unmanaged Standard".dimmed());
        for option in resolver::storage_tier_options(&ctx.catalogs().tiers) {
            println!("{:<20} {}", option.key, option.label);
        }
    }

    /// Print IOPS and prefix requirement for a disk type.
    ///
    /// # Errors
    ///
    /// Returns an error for a tier key that is not in the catalog.
    pub fn handle_tier(ctx: &AppContext, key: &str) -> Result<()> {
        let effects = ctx.form.on_tier_changed(key)?;
        println!("iops: {}", effects.iops);
        println!(
            "storage account prefix: {}",
            if effects.requires_prefix {
                "required".yellow()
            } else {
                "not required".normal()
            }
        );
        Ok(())
    }

    /// List the fields applicable to a mode.
    pub fn handle_fields(mode: &str) {
        let mode = Mode::from_tag(mode);
        for field in Field::ALL {
            if mode.is_applicable(field) {
                println!("{}", field.id().green());
            } else {
                debug!("{} not applicable in mode {mode}", field.id());
            }
        }
    }

    /// Print the JSON schema of the configuration record.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be serialized.
    pub fn handle_schema() -> Result<()> {
        let schema = schemars::schema_for!(ConfigurationRecord);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use clusterform::Catalogs;

    fn ctx(workdir: PathBuf) -> AppContext {
        AppContext::with_catalogs(GeneratorConfig::default(), Catalogs::builtin().unwrap(), workdir)
    }

    #[test]
    fn test_validate_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("form.toml"),
            "vcpu-count = \"8\"\netcd-node-count = \"3\"\n",
        )
        .unwrap();

        let mut ctx = ctx(dir.path().to_path_buf());
        let args = ValidateArgs {
            mode: "cloudconfig".to_string(),
            input: Some(PathBuf::from("form.toml")),
            set: vec!["etcd-node-count=5".to_string()],
            format: Some(OutputFormat::Json),
            output: Some(PathBuf::from("record.json")),
        };
        CommandHandler::handle_validate(&mut ctx, &args).unwrap();

        let written = std::fs::read_to_string(dir.path().join("record.json")).unwrap();
        let record: ConfigurationRecord = serde_json::from_str(&written).unwrap();
        let ConfigurationRecord::CloudConfig { settings, .. } = record else {
            panic!("expected a cloudconfig record");
        };
        assert_eq!(settings.vcpu_count, 8);
        assert_eq!(settings.etcd_node_count, 5);
    }

    #[test]
    fn test_validate_reports_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ctx(dir.path().to_path_buf());
        let args = ValidateArgs {
            mode: "arm".to_string(),
            set: vec!["node-count=4".to_string()],
            ..Default::default()
        };
        let err = CommandHandler::handle_validate(&mut ctx, &args).unwrap_err();
        assert!(err.to_string().contains("node-count"));
    }

    #[test]
    fn test_tier_unknown_key() {
        let ctx = ctx(PathBuf::from("."));
        assert!(CommandHandler::handle_tier(&ctx, "premium-p99").is_err());
        assert!(CommandHandler::handle_tier(&ctx, UNMANAGED_STANDARD).is_ok());
    }
}
