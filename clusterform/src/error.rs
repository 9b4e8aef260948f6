//! Error types for catalog loading, raw input conversion and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::Field;

/// Rejection of a single form field.
///
/// Validation stops at the first failing field, so a run produces at most
/// one `FieldError` and never a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {violation}")]
pub struct FieldError {
    /// The offending field.
    pub field: Field,
    /// The constraint it failed.
    pub violation: Violation,
}

impl FieldError {
    pub(crate) fn new(field: Field, violation: Violation) -> Self {
        Self { field, violation }
    }
}

/// The constraint a field value failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The value is not a base-10 integer.
    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),
    /// The integer is not a member of the allowed set.
    #[error("{actual} is not one of {allowed:?}")]
    NotAllowed {
        actual: i64,
        allowed: &'static [i64],
    },
    /// The integer is outside an inclusive range.
    #[error("{actual} is outside {min}..={max}")]
    OutOfRange { actual: i64, min: i64, max: i64 },
    /// The integer is below an open-ended lower bound.
    #[error("{actual} is below the minimum of {min}")]
    BelowMinimum { actual: i64, min: i64 },
    /// The machine size is not in the catalog.
    #[error("unknown machine size {0:?}")]
    UnknownSize(String),
    /// The string does not match the field's pattern.
    #[error("{value:?} does not match {pattern}")]
    PatternMismatch {
        value: String,
        pattern: &'static str,
    },
}

/// Errors raised while loading catalogs or resolving catalog entries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalog content is not valid JSON for its schema.
    #[error("failed to parse {name} catalog: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The tier key is neither the unmanaged sentinel nor a catalog entry.
    #[error("unknown storage tier: {0}")]
    UnknownStorageTier(String),
}

/// Errors raised while turning structured input into a [`RawFields`] set.
///
/// [`RawFields`]: crate::field::RawFields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSetError {
    /// The input is not a key/value object.
    #[error("expected an object of form fields, got {0}")]
    NotAnObject(String),
    /// A field value is not a scalar.
    #[error("field {key}: expected string, number, or boolean, got {actual}")]
    NotAScalar { key: String, actual: String },
}
