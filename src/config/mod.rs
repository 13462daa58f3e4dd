//! # Configuration Management
//!
//! Layered application configuration: built-in defaults, an optional file,
//! then `CFGPLANE__SECTION__KEY` environment variables.

pub mod settings;

pub use settings::{AppConfig, AuditConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};

use std::path::Path;

use crate::errors::Result;

/// Prefix for environment overrides, e.g. `CFGPLANE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "CFGPLANE";

/// Load and validate the application configuration.
///
/// A missing `path` means defaults plus environment only; a given path must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let mut builder =
        config::Config::builder().add_source(config::Config::try_from(&AppConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let config: AppConfig = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}
