//! Keymacro configuration management using Figment
//!
//! Configuration is layered: built-in defaults, then configuration files,
//! then environment variables.
//!
//! # Configuration Files
//!
//! - Global: `~/.keymacro/keymacro.{toml,yaml,yml,json}`
//! - Project: `./.keymacro/keymacro.{toml,yaml,yml,json}`
//!
//! ```toml
//! [expand]
//! ignore_env_var_not_found_or_too_long = false
//! detect_max_var_sizes = false
//! env_value_max_len = 32767
//! date_format = "%Y-%m-%d"
//! time_format = "%H:%M:%S"
//!
//! [limits]
//! output_capacity = 32768
//! selection_list_max_len = 32768
//! placement_capacity = 64
//! column_count = 32
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export KEYMACRO_EXPAND__IGNORE_ENV_VAR_NOT_FOUND_OR_TOO_LONG=true
//! export KEYMACRO_LIMITS__OUTPUT_CAPACITY=4096
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use keymacro_config::load_configuration;
//!
//! let config = load_configuration()?;
//! let options = config.expand_options();
//! # Ok::<(), keymacro_config::ConfigError>(())
//! ```

/// File discovery logic for configuration files
pub mod discovery;
/// Error types and handling
pub mod error;
/// Figment-based configuration provider
pub mod provider;
/// Configuration sections
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use types::{EngineConfig, ExpandSection, LimitsSection};

/// Load configuration from all default sources
pub fn load_configuration() -> ConfigResult<EngineConfig> {
    ConfigProvider::new().load()
}
