//! # clusterform
//!
//! Mode-dependent validation and normalization for the CoreOS cluster
//! generator form.
//!
//! The form has two deployment modes. `arm` describes a full cluster
//! deployed from an Azure Resource Manager template. `cloudconfig` describes
//! a single host joining an etcd2 cluster. This crate turns the raw,
//! user-entered field values plus the selected mode into a typed
//! [`ConfigurationRecord`] or a [`FieldError`] naming the first offending
//! field.
//!
//! ## Features
//!
//! - Built-in Azure machine size and managed disk catalogs, replaceable from JSON
//! - Derived options: data disk range per machine size, IOPS and prefix
//!   visibility per disk type
//! - Fail-fast validation in a fixed field order
//! - Serializable record with a JSON Schema for the downstream generator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clusterform::{Catalogs, FormContext, RawFields};
//!
//! let mut form = FormContext::new(Catalogs::builtin().unwrap());
//! form.set_mode("cloudconfig");
//!
//! let raw: RawFields = [("vcpu-count", "4"), ("etcd-node-count", "3")]
//!     .into_iter()
//!     .collect();
//! let record = form.submit(&raw).unwrap();
//! assert!(record.auto_generate_discovery());
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Machine size and managed disk catalogs
//! - [`field`] - Field ids and the raw field set
//! - [`mode`] - Mode selection and the form context
//! - [`resolver`] - Options derived from a driving field
//! - [`validate`] - Submission-time validation
//! - [`record`] - The normalized configuration record
//! - [`error`] - Error types

/// Machine size and managed disk catalogs.
pub mod data;

/// Error types.
pub mod error;

/// Field ids and raw field values.
pub mod field;

/// Mode selection and the form context.
pub mod mode;

/// The normalized configuration record.
pub mod record;

pub mod resolver;

pub mod validate;

pub use data::Catalogs;
pub use error::{CatalogError, FieldError, FieldSetError, Violation};
pub use field::{Field, RawFields};
pub use mode::{FormContext, Mode};
pub use record::{ArmSettings, CloudConfigSettings, ConfigurationRecord};
pub use resolver::{DataDiskRange, StorageTierEffects};
pub use validate::validate;
