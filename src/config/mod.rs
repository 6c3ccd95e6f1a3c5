//! Configuration management for the catalog service.
//!
//! Layered configuration loading:
//! 1. `config/default.toml` - base defaults
//! 2. `config/{environment}.toml` - environment-specific overrides
//! 3. `config/local.toml` - local development overrides (not committed)
//! 4. `PUSTAKA__*` environment variables (highest priority)
//!
//! `DATABASE_URL` is additionally honored as an override for the database
//! connection string, matching common deployment conventions.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{AuthConfig, DatabaseConfig, ServerConfig, Settings, StorageConfig};
