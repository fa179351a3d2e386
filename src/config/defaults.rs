//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

use super::validation::OutputFormat;
use crate::apimachinery::TOTAL_ANNOTATION_SIZE_LIMIT_BYTES;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_true, bool, true);
default_fn!(
    default_total_annotation_size_bytes,
    usize,
    TOTAL_ANNOTATION_SIZE_LIMIT_BYTES
);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// How reports are printed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Report format (default: text)
    #[serde(default)]
    pub format: OutputFormat,
    /// Echo offending values in text reports (default: true)
    #[serde(default = "default_true")]
    pub show_bad_values: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_bad_values: default_true(),
        }
    }
}

/// Limits handed to the shared validators
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum combined size of annotation keys and values (default: 256 KiB)
    #[serde(default = "default_total_annotation_size_bytes")]
    pub total_annotation_size_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            total_annotation_size_bytes: default_total_annotation_size_bytes(),
        }
    }
}
