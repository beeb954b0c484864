use super::{data::DataConfig, evolution::EvolutionConfig, traits::ConfigSection};
use crate::error::SymregError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment overrides, e.g. `SYMREG__EVOLUTION__POPULATION_SIZE=500`.
pub const ENV_PREFIX: &str = "SYMREG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SymregError> {
        self.evolution.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

fn poisoned<T>(_: T) -> SymregError {
    SymregError::Configuration("Config lock poisoned".to_string())
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Defaults, then the file, then `SYMREG__`-prefixed environment variables.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SymregError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;
        self.install(settings.try_deserialize()?)
    }

    /// Defaults overridden by environment variables only.
    pub fn load_from_env(&self) -> Result<(), SymregError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(Self::environment())
            .build()?;
        self.install(settings.try_deserialize()?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn install(&self, config: AppConfig) -> Result<(), SymregError> {
        config.validate()?;
        log::debug!(
            "Loaded {} and {} sections",
            EvolutionConfig::section_name(),
            DataConfig::section_name()
        );
        *self.config.write().map_err(poisoned)? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SymregError> {
        let config = self.config.read().map_err(poisoned)?;
        let toml_str = toml::to_string_pretty(&*config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, SymregError> {
        Ok(self.config.read().map_err(poisoned)?.clone())
    }

    /// Applies `f` and keeps the result only if it validates.
    pub fn update<F>(&self, f: F) -> Result<(), SymregError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().map_err(poisoned)?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
