//! # Structured Logging
//!
//! Subscriber setup and the span macros used across the crate.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from the configured
//! `log_level`. JSON output is meant for log shippers; the default is the
//! human-readable format.

use crate::config::{AppConfig, ObservabilityConfig};
use crate::errors::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Create a tracing span for request tracking.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/api/v1/client/cluster");
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for database operations.
///
/// ```rust,ignore
/// let span = db_span!("migrate", pending = 2);
/// ```
#[macro_export]
macro_rules! db_span {
    ($operation:expr) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Build the filter: `RUST_LOG` wins over the configured level
fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Install the global tracing subscriber
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let result = if config.json_logging {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &AppConfig) {
    tracing::info!(
        server_address = %config.server.bind_address(),
        database_type = "sqlite",
        auto_migrate = config.database.auto_migrate,
        splunk_enabled = config.audit.splunk_enabled,
        metrics_enabled = config.observability.enable_metrics,
        json_logging = config.observability.json_logging,
        "cfgplane configuration"
    );
}
