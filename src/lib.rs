//! # cfgplane
//!
//! REST API for managing clusters and the configurations attached to them.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → handlers → Storage trait → SqlStorage (sqlx / SQLite)
//!                   ↓
//!              AuditLogger → Splunk HEC | tracing
//! ```
//!
//! Handlers validate request parameters, record configuration changes in the
//! audit log and delegate persistence to the injected [`storage::Storage`].

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;

use std::sync::Arc;

pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize observability, open storage and serve the API until shutdown
pub async fn run_server(config: AppConfig) -> Result<()> {
    observability::init_observability(&config.observability).await?;
    observability::log_config_info(&config);

    tracing::info!(app_name = APP_NAME, version = VERSION, "Starting cfgplane");

    let pool = storage::create_pool(&config.database).await?;
    observability::metrics::update_db_connections(&storage::get_pool_stats(&pool)).await;

    let storage: Arc<dyn storage::Storage> = Arc::new(storage::SqlStorage::new(pool.clone()));
    let audit = audit::build_audit_logger(&config.audit)?;

    api::start_api_server(&config.server, storage, audit).await?;

    pool.close().await;
    tracing::info!("cfgplane stopped");
    Ok(())
}
