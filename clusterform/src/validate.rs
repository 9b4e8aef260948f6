//! Submission-time validation and normalization.
//!
//! Fields are checked one at a time in a fixed order and the first failure
//! ends the run:
//!
//! | mode          | fields, in order                                                       |
//! |---------------|------------------------------------------------------------------------|
//! | `arm`         | node count, node size, data disks, storage prefix, SSH key, admin user |
//! | `cloudconfig` | vCPU count, etcd node count                                            |
//! | any           | etcd discovery URL, always last                                        |
//!
//! In `arm` mode a selected disk type is carried into the record as entered,
//! without being checked.

use std::sync::LazyLock;

use log::{debug, info, warn};
use regex::Regex;

use crate::{
    data::Catalogs,
    error::{FieldError, Violation},
    field::{Field, RawFields},
    mode::Mode,
    record::{ArmSettings, CloudConfigSettings, ConfigurationRecord},
    resolver::{MAX_DATA_DISKS, MIN_DATA_DISKS},
};

/// Node counts an ARM cluster may have.
pub const ALLOWED_NODE_COUNTS: &[i64] = &[3, 5];

/// Inclusive vCPU bounds for cloud-config hosts.
pub const VCPU_RANGE: (i64, i64) = (0, 32);

/// Smallest etcd2 cluster a cloud-config host may join.
pub const MIN_ETCD_NODES: i64 = 1;

pub const STORAGE_PREFIX_PATTERN: &str = r"^[0-9a-z]{1,7}$";
/// Anchored at the start only, so a trailing key comment is accepted.
pub const SSH_KEY_PATTERN: &str = r"^ssh-(rsa|dss) AAAA[0-9A-Za-z+/]+={0,3}";
pub const ADMIN_USERNAME_PATTERN: &str = r"^[a-z_][a-z0-9_-]*$";
pub const DISCOVERY_URL_PATTERN: &str = r"^https://discovery\.etcd\.io/[a-f0-9]{32}$";

static STORAGE_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(STORAGE_PREFIX_PATTERN));
static SSH_KEY: LazyLock<Regex> = LazyLock::new(|| compile(SSH_KEY_PATTERN));
static ADMIN_USERNAME: LazyLock<Regex> = LazyLock::new(|| compile(ADMIN_USERNAME_PATTERN));
static DISCOVERY_URL: LazyLock<Regex> = LazyLock::new(|| compile(DISCOVERY_URL_PATTERN));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in field pattern must compile")
}

/// Validate `raw` for `mode` and build the normalized record.
///
/// Only the fields applicable to `mode` are read. The returned error names
/// the first field that failed; later fields are not checked.
///
/// # Errors
///
/// Returns a [`FieldError`] for the first field that violates its constraint.
pub fn validate(
    raw: &RawFields,
    mode: &Mode,
    catalogs: &Catalogs,
) -> Result<ConfigurationRecord, FieldError> {
    let result = validate_fields(raw, mode, catalogs);
    match &result {
        Ok(_) => info!("form accepted for mode {mode}"),
        Err(e) => warn!("form rejected for mode {mode}: {e}"),
    }
    result
}

fn validate_fields(
    raw: &RawFields,
    mode: &Mode,
    catalogs: &Catalogs,
) -> Result<ConfigurationRecord, FieldError> {
    match mode {
        Mode::Arm => {
            let settings = arm_settings(raw, catalogs)?;
            let discovery_url = discovery_url(raw)?;
            Ok(ConfigurationRecord::Arm {
                settings,
                discovery_url,
            })
        }
        Mode::CloudConfig => {
            let settings = cloud_config_settings(raw)?;
            let discovery_url = discovery_url(raw)?;
            Ok(ConfigurationRecord::CloudConfig {
                settings,
                discovery_url,
            })
        }
        Mode::Unselected | Mode::Unrecognized(_) => Ok(ConfigurationRecord::ModeIndependent {
            tag: mode.tag().map(str::to_string),
            discovery_url: discovery_url(raw)?,
        }),
    }
}

fn arm_settings(raw: &RawFields, catalogs: &Catalogs) -> Result<ArmSettings, FieldError> {
    let node_count = integer(raw, Field::NodeCount)?;
    if !ALLOWED_NODE_COUNTS.contains(&node_count) {
        return Err(FieldError::new(
            Field::NodeCount,
            Violation::NotAllowed {
                actual: node_count,
                allowed: ALLOWED_NODE_COUNTS,
            },
        ));
    }

    let node_size = raw.get(Field::NodeSize).to_string();
    if !catalogs.sizes.contains(&node_size) {
        return Err(FieldError::new(
            Field::NodeSize,
            Violation::UnknownSize(node_size),
        ));
    }
    debug!("{}: {node_size}", Field::NodeSize);

    // Bounded by the catalog entry itself, not the option list: a size
    // allowing fewer than MIN_DATA_DISKS accepts no count at all.
    let data_disks = integer(raw, Field::DataDisks)?;
    let size_disks = catalogs.sizes.get(&node_size).map_or(0, |size| size.disks);
    let (min, max) = (
        i64::from(MIN_DATA_DISKS),
        i64::from(size_disks.min(MAX_DATA_DISKS)),
    );
    if data_disks < min || data_disks > max {
        return Err(FieldError::new(
            Field::DataDisks,
            Violation::OutOfRange {
                actual: data_disks,
                min,
                max,
            },
        ));
    }

    let storage_account_prefix = matching(
        raw,
        Field::StorageAccountPrefix,
        &STORAGE_PREFIX,
        STORAGE_PREFIX_PATTERN,
    )?;
    let ssh_key = matching(raw, Field::SshKey, &SSH_KEY, SSH_KEY_PATTERN)?;
    let admin_username = matching(
        raw,
        Field::AdminUsername,
        &ADMIN_USERNAME,
        ADMIN_USERNAME_PATTERN,
    )?;

    let disk_type = match raw.get(Field::DiskType).trim() {
        "" => None,
        key => Some(key.to_string()),
    };

    Ok(ArmSettings {
        node_count: narrow(node_count),
        node_size,
        data_disks: narrow(data_disks),
        storage_account_prefix,
        ssh_key,
        admin_username,
        disk_type,
    })
}

fn cloud_config_settings(raw: &RawFields) -> Result<CloudConfigSettings, FieldError> {
    let vcpu_count = integer(raw, Field::VcpuCount)?;
    let (min, max) = VCPU_RANGE;
    if !(min..=max).contains(&vcpu_count) {
        return Err(FieldError::new(
            Field::VcpuCount,
            Violation::OutOfRange {
                actual: vcpu_count,
                min,
                max,
            },
        ));
    }

    let etcd_node_count = integer(raw, Field::EtcdNodeCount)?;
    if etcd_node_count < MIN_ETCD_NODES {
        return Err(FieldError::new(
            Field::EtcdNodeCount,
            Violation::BelowMinimum {
                actual: etcd_node_count,
                min: MIN_ETCD_NODES,
            },
        ));
    }

    Ok(CloudConfigSettings {
        vcpu_count: narrow(vcpu_count),
        etcd_node_count: etcd_node_count.unsigned_abs(),
    })
}

/// Empty means "generate one"; anything else must be a discovery.etcd.io URL.
fn discovery_url(raw: &RawFields) -> Result<Option<String>, FieldError> {
    let value = raw.get(Field::DiscoveryUrl).trim();
    if value.is_empty() {
        debug!("{}: auto-generate", Field::DiscoveryUrl);
        return Ok(None);
    }
    if !DISCOVERY_URL.is_match(value) {
        return Err(FieldError::new(
            Field::DiscoveryUrl,
            Violation::PatternMismatch {
                value: value.to_string(),
                pattern: DISCOVERY_URL_PATTERN,
            },
        ));
    }
    Ok(Some(value.to_string()))
}

fn integer(raw: &RawFields, field: Field) -> Result<i64, FieldError> {
    let value = raw.get(field).trim();
    let parsed = value
        .parse::<i64>()
        .map_err(|_| FieldError::new(field, Violation::NotAnInteger(value.to_string())))?;
    debug!("{field}: {parsed}");
    Ok(parsed)
}

fn matching(
    raw: &RawFields,
    field: Field,
    regex: &Regex,
    pattern: &'static str,
) -> Result<String, FieldError> {
    let value = raw.get(field).trim();
    if !regex.is_match(value) {
        return Err(FieldError::new(
            field,
            Violation::PatternMismatch {
                value: value.to_string(),
                pattern,
            },
        ));
    }
    debug!("{field}: ok");
    Ok(value.to_string())
}

/// Values reaching here were already bounds-checked to fit a `u32`.
fn narrow(value: i64) -> u32 {
    u32::try_from(value).unwrap_or_default()
}
