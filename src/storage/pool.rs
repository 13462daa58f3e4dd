//! # Database Connection Pool Management
//!
//! Provides database connection pool creation and management utilities.

use crate::config::DatabaseConfig;
use crate::errors::{Error, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::{str::FromStr, time::Duration};

/// Type alias for the database connection pool
pub type DbPool = Pool<Sqlite>;

const SQLITE_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a database connection pool with the specified configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    validate_config(config)?;

    let in_memory = config.url.contains(":memory:");

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout());

    if in_memory {
        // every connection to :memory: is a separate database
        pool_options = pool_options.max_lifetime(None);
    }

    let mut connect_options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            Error::database(
                e,
                format!("Invalid SQLite connection string: {}", sanitize_url(&config.url)),
            )
        })?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(SQLITE_BUSY_TIMEOUT);

    if !in_memory {
        connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = pool_options.connect_with(connect_options).await.map_err(|e| {
        tracing::error!(
            error = %e,
            url = %sanitize_url(&config.url),
            busy_timeout_ms = SQLITE_BUSY_TIMEOUT.as_millis(),
            "Failed to create SQLite database pool"
        );
        Error::database(e, format!("Failed to connect to database: {}", sanitize_url(&config.url)))
    })?;

    tracing::info!(
        database_type = "sqlite",
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_ms = config.connect_timeout().as_millis(),
        idle_timeout_ms = config.idle_timeout().map(|d| d.as_millis()),
        "Database connection pool created"
    );

    if config.auto_migrate {
        tracing::info!("Auto-migration enabled, running database migrations");
        crate::storage::migrations::run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Validate database configuration
fn validate_config(config: &DatabaseConfig) -> Result<()> {
    if config.max_connections == 0 {
        return Err(Error::validation("max_connections must be greater than 0"));
    }

    if config.min_connections > config.max_connections {
        return Err(Error::validation("min_connections cannot be greater than max_connections"));
    }

    if config.url.is_empty() {
        return Err(Error::validation("database URL cannot be empty"));
    }

    if !config.is_sqlite() {
        return Err(Error::validation("database URL must start with 'sqlite:'"));
    }

    if config.url.contains(":memory:") && config.max_connections > 1 {
        return Err(Error::validation("in-memory databases require max_connections = 1"));
    }

    Ok(())
}

/// Sanitize database URL for logging (remove credentials)
fn sanitize_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if parsed.password().is_some() || !parsed.username().is_empty() {
            format!(
                "{}://***:***@{}{}",
                parsed.scheme(),
                parsed.host_str().unwrap_or("unknown"),
                parsed.path()
            )
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}

/// Get pool statistics for monitoring
pub fn get_pool_stats(pool: &DbPool) -> PoolStats {
    PoolStats { size: pool.size(), idle: pool.num_idle() }
}

/// Pool statistics for monitoring
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Total connections in the pool
    pub size: u32,
    /// Number of idle connections
    pub idle: usize,
}

impl PoolStats {
    /// Get the number of active connections
    pub fn active(&self) -> u32 {
        self.size.saturating_sub(self.idle as u32)
    }

    /// Check if the pool is healthy (has available connections)
    pub fn is_healthy(&self) -> bool {
        self.size > 0
    }
}
