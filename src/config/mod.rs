//! Configuration management for seedcheck.
//!
//! Configuration is YAML and layered: the global file, the project file in
//! the working directory, and finally a file named on the command line.
//! Later layers override earlier ones field by field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::apimachinery::Apimachinery;
use crate::paths::PROJECT_CONFIG_FILE;

pub mod defaults;
pub mod validation;

pub use defaults::*;
pub use validation::*;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/seedcheck/config.yaml)
    /// 2. Project config (.seedcheck.yaml)
    /// 3. Explicit config passed on the command line
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(PROJECT_CONFIG_FILE),
            explicit,
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse config")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }

    /// Load merged configuration from the given layers. Missing global and
    /// project files are skipped; an explicit file must exist.
    pub fn load_merged_from(
        global_path: Option<&Path>,
        project_path: &Path,
        explicit_path: Option<&Path>,
    ) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let explicit_config = explicit_path
            .map(|p| {
                let expanded = PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).to_string());
                PartialConfig::load_from(&expanded)
            })
            .transpose()?
            .unwrap_or_default();

        let config = global_config
            .overlay(project_config)
            .overlay(explicit_config)
            .resolve();

        config.validate()?;
        log::debug!("effective config: {:?}", config);

        Ok(config)
    }

    /// Shared validators configured with this config's limits.
    pub fn shared_validators(&self) -> Apimachinery {
        Apimachinery::new().with_annotation_size_limit(self.limits.total_annotation_size_bytes)
    }
}

/// Returns the path to the global config file at ~/.config/seedcheck/config.yaml
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("seedcheck").join("config.yaml"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub output: Option<PartialOutputConfig>,
    pub limits: Option<PartialLimitsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialOutputConfig {
    pub format: Option<OutputFormat>,
    pub show_bad_values: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialLimitsConfig {
    pub total_annotation_size_bytes: Option<usize>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse config")
    }

    /// Lay `upper` over `self`. Values set in `upper` win.
    fn overlay(self, upper: PartialConfig) -> PartialConfig {
        let lower_output = self.output.unwrap_or_default();
        let upper_output = upper.output.unwrap_or_default();
        let lower_limits = self.limits.unwrap_or_default();
        let upper_limits = upper.limits.unwrap_or_default();

        PartialConfig {
            output: Some(PartialOutputConfig {
                format: upper_output.format.or(lower_output.format),
                show_bad_values: upper_output.show_bad_values.or(lower_output.show_bad_values),
            }),
            limits: Some(PartialLimitsConfig {
                total_annotation_size_bytes: upper_limits
                    .total_annotation_size_bytes
                    .or(lower_limits.total_annotation_size_bytes),
            }),
        }
    }

    /// Fill unset values with defaults.
    fn resolve(self) -> Config {
        let output = self.output.unwrap_or_default();
        let limits = self.limits.unwrap_or_default();

        Config {
            output: OutputConfig {
                format: output.format.unwrap_or_default(),
                show_bad_values: output
                    .show_bad_values
                    .unwrap_or_else(defaults::default_true),
            },
            limits: LimitsConfig {
                total_annotation_size_bytes: limits
                    .total_annotation_size_bytes
                    .unwrap_or_else(defaults::default_total_annotation_size_bytes),
            },
        }
    }
}
