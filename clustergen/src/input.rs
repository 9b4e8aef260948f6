//! Raw form input and record output.
//!
//! Form values come from a `.json` or `.toml` file holding one key per field
//! id, optionally overridden with `FIELD=VALUE` assignments from the command
//! line. Validated records are rendered back as JSON or TOML.

use std::path::Path;

use anyhow::Context;
use clusterform::{ConfigurationRecord, Field, RawFields};

use crate::config::OutputFormat;

/// Read raw form values from a JSON or TOML file.
///
/// # Errors
///
/// Returns an error for unreadable files, unsupported extensions, or content
/// that is not a flat table of scalar values.
pub fn read_raw_fields(path: &Path) -> anyhow::Result<RawFields> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(RawFields::new());
    }

    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    let value: serde_json::Value = match ext {
        "json" => serde_json::from_str(&content)?,
        "toml" => {
            let v: toml::Value = toml::from_str(&content)?;
            serde_json::to_value(v)?
        }
        _ => bail!("Unsupported form file extension: {ext:?}"),
    };

    let fields = RawFields::from_value(&value)
        .with_context(|| format!("Invalid form file {}", path.display()))?;
    for (key, _) in fields.iter() {
        if key.parse::<Field>().is_err() {
            warn!("ignoring unknown form field {key:?}");
        }
    }
    Ok(fields)
}

/// Split a `FIELD=VALUE` assignment. The value may be empty.
///
/// # Errors
///
/// Returns an error when there is no `=` or the field id is unknown.
pub fn parse_assignment(s: &str) -> anyhow::Result<(Field, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got {s:?}"))?;
    let field = key.trim().parse::<Field>()?;
    Ok((field, value.to_string()))
}

/// Render a validated record.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(record: &ConfigurationRecord, format: OutputFormat) -> anyhow::Result<String> {
    let s = match format {
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
        OutputFormat::Toml => {
            // TOML has no null; drop the auto-generate marker instead.
            let mut value = serde_json::to_value(record)?;
            if let Some(map) = value.as_object_mut() {
                map.retain(|_, v| !v.is_null());
            }
            toml::to_string_pretty(&value)?
        }
    };
    Ok(s)
}
