//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::ConfigResult;
use crate::types::EngineConfig;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, trace};

/// Prefix of environment variables read by the provider
pub const ENV_PREFIX: &str = "KEYMACRO_";

/// Loads [`EngineConfig`] from all sources.
///
/// Sources are merged in precedence order, later ones overriding earlier:
/// 1. Built-in defaults
/// 2. Discovered configuration files (global, then project)
/// 3. `KEYMACRO_` environment variables, nested keys split on `__`
///    (`KEYMACRO_LIMITS__OUTPUT_CAPACITY=4096`)
///
/// Nothing is cached; every call reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<EngineConfig> {
        debug!("Loading keymacro configuration");

        let config: EngineConfig = self.build_figment().extract()?;
        config.validate()?;

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn build_figment(&self) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(EngineConfig::default()))
            .merge(self.load_discovered_config_files())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn load_discovered_config_files(&self) -> Figment {
        self.discovery
            .discover_all()
            .iter()
            .fold(Figment::new(), |figment, file| {
                trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
                figment.merge(Self::load_config_file(file))
            })
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}
