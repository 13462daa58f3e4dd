//! # Database Migration Management
//!
//! SQL migrations under `migrations/` are embedded into the binary at build
//! time and applied with the `sqlx` migrator, either on startup when
//! `auto_migrate` is enabled or through `cfgplane database migrate`.

use crate::errors::{Error, Result};
use crate::storage::DbPool;
use serde::{Deserialize, Serialize};
use sqlx::migrate::Migrator;
use tracing::{info, Instrument};

/// Embedded migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Migration information structure
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MigrationInfo {
    pub version: i64,
    pub description: String,
    pub installed_on: chrono::DateTime<chrono::Utc>,
    pub execution_time: i64,
}

/// Run all pending database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    let available = MIGRATOR.iter().count();
    info!(available, "Starting database migration process");

    MIGRATOR.run(pool).instrument(crate::db_span!("run_migrations", available)).await?;

    info!(version = ?latest_embedded_version(), "Database migrations completed");
    Ok(())
}

/// List migrations already applied to the database, oldest first
pub async fn list_applied_migrations(pool: &DbPool) -> Result<Vec<MigrationInfo>> {
    sqlx::query_as::<_, MigrationInfo>(
        "SELECT version, description, installed_on, execution_time FROM _sqlx_migrations \
         WHERE success = TRUE ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::database(e, "Failed to list applied migrations"))
}

/// Check whether every embedded migration has been applied
pub async fn validate_migrations(pool: &DbPool) -> Result<bool> {
    let applied = match list_applied_migrations(pool).await {
        Ok(applied) => applied,
        // migration table missing entirely
        Err(Error::Database { source: sqlx::Error::Database(_), .. }) => return Ok(false),
        Err(e) => return Err(e),
    };

    let applied_versions: Vec<i64> = applied.iter().map(|m| m.version).collect();
    let pending: Vec<i64> = MIGRATOR
        .iter()
        .map(|m| m.version)
        .filter(|version| !applied_versions.contains(version))
        .collect();

    if !pending.is_empty() {
        info!(pending = ?pending, "Database has pending migrations");
    }

    Ok(pending.is_empty())
}

/// Get the version of the newest applied migration
pub async fn get_migration_version(pool: &DbPool) -> Result<Option<i64>> {
    Ok(list_applied_migrations(pool).await?.last().map(|m| m.version))
}

fn latest_embedded_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}
