//! Typed configuration sections

use crate::error::{ConfigError, ConfigResult};
use keymacro::expand::{DEFAULT_DATE_FORMAT, DEFAULT_ENV_VALUE_MAX_LEN, DEFAULT_TIME_FORMAT};
use keymacro::ExpandOptions;
use serde::{Deserialize, Serialize};

/// `[expand]` section: options passed to every expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandSection {
    pub ignore_env_var_not_found_or_too_long: bool,
    pub detect_max_var_sizes: bool,
    pub env_value_max_len: usize,
    pub date_format: String,
    pub time_format: String,
}

impl Default for ExpandSection {
    fn default() -> Self {
        Self {
            ignore_env_var_not_found_or_too_long: false,
            detect_max_var_sizes: false,
            env_value_max_len: DEFAULT_ENV_VALUE_MAX_LEN,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// `[limits]` section: sizes of the caller-owned buffers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsSection {
    /// Output buffer capacity in bytes
    pub output_capacity: usize,
    /// Longest joined selection list before it is dropped
    pub selection_list_max_len: usize,
    /// Number of info-line placements kept
    pub placement_capacity: usize,
    /// Number of columns tracked for `:max`
    pub column_count: usize,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            output_capacity: 32768,
            selection_list_max_len: 32768,
            placement_capacity: 64,
            column_count: 32,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub expand: ExpandSection,
    pub limits: LimitsSection,
}

impl EngineConfig {
    /// Reject values the engine cannot work with
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("expand.env_value_max_len", self.expand.env_value_max_len),
            ("limits.output_capacity", self.limits.output_capacity),
            ("limits.selection_list_max_len", self.limits.selection_list_max_len),
            ("limits.column_count", self.limits.column_count),
        ];
        if let Some((key, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::invalid_value(*key, "must be greater than zero"));
        }

        for (key, format) in [
            ("expand.date_format", &self.expand.date_format),
            ("expand.time_format", &self.expand.time_format),
        ] {
            if format.trim().is_empty() {
                return Err(ConfigError::invalid_value(key, "format string is empty"));
            }
        }
        Ok(())
    }

    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            ignore_env_var_not_found_or_too_long: self.expand.ignore_env_var_not_found_or_too_long,
            detect_max_var_sizes: self.expand.detect_max_var_sizes,
            env_value_max_len: self.expand.env_value_max_len,
            date_format: self.expand.date_format.clone(),
            time_format: self.expand.time_format.clone(),
        }
    }
}
