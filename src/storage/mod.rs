//! # Storage and Persistence
//!
//! This module provides database connectivity and the persistence layer for
//! clusters and their configurations. Handlers only see the [`Storage`]
//! trait; [`SqlStorage`] backs it with SQLite.

pub mod migrations;
pub mod pool;
pub mod repositories;
pub mod sql;

pub use crate::config::DatabaseConfig;

pub use migrations::{
    get_migration_version, list_applied_migrations, run_migrations, validate_migrations,
    MigrationInfo,
};
pub use pool::{create_pool, get_pool_stats, DbPool, PoolStats};
pub use repositories::{ClusterRepository, ConfigurationRepository};
pub use sql::SqlStorage;

use crate::domain::{
    ActivationState, Cluster, ClusterId, Configuration, ConfigurationId, NewConfiguration,
};
use crate::errors::{Error, Result};
use async_trait::async_trait;

/// Persistence operations used by the HTTP handlers
#[async_trait]
pub trait Storage: Send + Sync {
    /// Verify the backing store is reachable
    async fn ping(&self) -> Result<()>;

    async fn list_clusters(&self) -> Result<Vec<Cluster>>;

    async fn get_cluster(&self, id: ClusterId) -> Result<Cluster>;

    async fn find_cluster_by_name(&self, name: &str) -> Result<Cluster>;

    async fn create_cluster(&self, id: ClusterId, name: &str) -> Result<Cluster>;

    /// Returns `false` when no cluster had the given ID
    async fn delete_cluster(&self, id: ClusterId) -> Result<bool>;

    /// Raw body of a single configuration
    async fn get_cluster_configuration_by_id(&self, id: ConfigurationId) -> Result<String>;

    async fn delete_cluster_configuration_by_id(&self, id: ConfigurationId) -> Result<()>;

    async fn list_all_cluster_configurations(&self) -> Result<Vec<Configuration>>;

    /// Configurations of one cluster; fails for an unknown cluster
    async fn list_cluster_configuration(&self, cluster_id: ClusterId)
        -> Result<Vec<Configuration>>;

    async fn enable_or_disable_cluster_configuration_by_id(
        &self,
        id: ConfigurationId,
        state: ActivationState,
    ) -> Result<()>;

    /// Store a new inactive configuration and return the cluster's updated list
    async fn create_cluster_configuration(
        &self,
        request: NewConfiguration,
    ) -> Result<Vec<Configuration>>;

    /// Activate every configuration of a cluster and return the updated list
    async fn enable_cluster_configuration(
        &self,
        cluster_id: ClusterId,
        username: &str,
        reason: &str,
    ) -> Result<Vec<Configuration>>;

    /// Deactivate every configuration of a cluster and return the updated list
    async fn disable_cluster_configuration(
        &self,
        cluster_id: ClusterId,
        username: &str,
        reason: &str,
    ) -> Result<Vec<Configuration>>;
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database(e, "Database connectivity check failed"))?;

    Ok(())
}
