//! Command module structure for the seedcheck CLI

use anyhow::Result;
use std::path::Path;

use seedcheck::config::{Config, OutputFormat};

pub mod config;
pub mod util;
pub mod validate;

/// Settings every command runs with: the merged config plus the
/// command-line overrides.
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Load the layered config and apply the `--format` override.
    pub fn load(explicit_config: Option<&Path>, format: Option<&str>, quiet: bool) -> Result<Self> {
        let config = Config::load(explicit_config)?;
        let format = match format {
            Some(f) => f.parse::<OutputFormat>()?,
            None => config.output.format,
        };

        Ok(Self {
            config,
            format,
            quiet,
        })
    }
}
