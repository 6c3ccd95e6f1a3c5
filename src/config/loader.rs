//! Layered configuration loader.

use std::path::{Path, PathBuf};

use config::{Config, Environment as EnvSource, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for the configuration directory.
const CONFIG_DIR_ENV: &str = "PUSTAKA_CONFIG_DIR";

/// Default configuration directory.
const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix for configuration override variables, e.g.
/// `PUSTAKA__SERVER__PORT=8080`.
const ENV_PREFIX: &str = "PUSTAKA";

/// Separator for nested keys in environment variables.
const ENV_SEPARATOR: &str = "__";

/// Loads settings from layered sources (lowest to highest priority):
/// `default.toml`, `{environment}.toml`, `local.toml`, `PUSTAKA__*`
/// environment variables, and finally `DATABASE_URL` for the database
/// connection string.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: Environment,
}

impl ConfigLoader {
    pub fn new() -> Self {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        Self {
            config_dir,
            environment: Environment::from_env(),
        }
    }

    /// Loads and deserializes the settings.
    ///
    /// Only `default.toml` is required; the environment-specific and local
    /// layers are optional.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let default_file = self.config_dir.join("default.toml");
        if !default_file.exists() {
            return Err(ConfigError::FileNotFound(
                default_file.display().to_string(),
            ));
        }

        let mut builder = Config::builder()
            .add_source(Self::toml_file(&default_file, true))
            .add_source(Self::toml_file(
                &self
                    .config_dir
                    .join(format!("{}.toml", self.environment.as_str())),
                false,
            ))
            .add_source(Self::toml_file(&self.config_dir.join("local.toml"), false))
            .add_source(EnvSource::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));

        // Deployment convention: DATABASE_URL wins over file configuration.
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder
                .set_override("database.url", url)
                .map_err(ConfigError::Other)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.auth.validate()?;
        Ok(settings)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    fn toml_file(path: &Path, required: bool) -> File<config::FileSourceFile, FileFormat> {
        File::from(path.to_path_buf())
            .format(FileFormat::Toml)
            .required(required)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
