//! # Seedcheck - validation for Seed resources
//!
//! A Seed registers a hosting cluster with a cluster-management control
//! plane. This crate checks Seed documents before they are admitted and
//! reports every problem it finds as a field-addressed diagnostic.
//!
//! ## Core Concepts
//!
//! - **Diagnostics**: `(field path, kind, message, bad value)` findings, collected
//!   in declaration order and never short-circuited
//! - **Pipelines**: create, update and status-update, each returning the full
//!   list of findings
//! - **Shared validators**: generic metadata and naming rules injected through
//!   the [`apimachinery::SharedValidators`] trait
//!
//! ## Modules
//!
//! - [`seed`] - The Seed data model and YAML loading
//! - [`field`] - Field paths and diagnostics
//! - [`cidr`] - CIDR block parsing and overlap
//! - [`apimachinery`] - Shared metadata, name and quantity validators
//! - [`validation`] - The Seed validation pipelines
//! - [`config`] - Layered configuration
//! - [`formatters`] - Text and JSON report output
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use seedcheck::seed::Seed;
//! use seedcheck::validation::validate_seed;
//!
//! let seed = Seed::load(Path::new("seed.yaml")).expect("Failed to load seed");
//! for diagnostic in &validate_seed(&seed) {
//!     println!("{}", diagnostic);
//! }
//! ```

pub mod apimachinery;
pub mod cidr;
pub mod config;
pub mod field;
pub mod formatters;
pub mod seed;
pub mod validation;

/// Well-known file names.
pub mod paths {
    /// Project configuration file in the working directory: `.seedcheck.yaml`
    pub const PROJECT_CONFIG_FILE: &str = ".seedcheck.yaml";
}
