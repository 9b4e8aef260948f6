//! # clustergen
//!
//! Command-line front end for the CoreOS cluster generator form.
//!
//! `clustergen` plays the part of the form's presentation layer. It loads the
//! catalogs, reads raw form values from a file or the command line, drives
//! [`clusterform`] and prints derived options, validated records, or the
//! field that was rejected.
//!
//! ## Modules
//!
//! - [`commands`] - Command handlers
//! - [`config`] - `.clustergen.toml` configuration
//! - [`ctx`] - Application context and state management
//! - [`input`] - Raw form input and record output

/// Command handlers.
pub mod commands;

/// Generator configuration types and loading.
pub mod config;

/// Application context and state management.
pub mod ctx;

/// Raw form input and record rendering.
pub mod input;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub use clusterform;
