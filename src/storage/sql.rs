//! SQLite-backed [`Storage`] implementation
//!
//! Composes the cluster and configuration repositories over one pool.

use async_trait::async_trait;
use tracing::info;

use super::{check_connection, ClusterRepository, ConfigurationRepository, DbPool, Storage};
use crate::domain::{
    ActivationState, Cluster, ClusterId, Configuration, ConfigurationId, NewConfiguration,
};
use crate::errors::{Error, Result};

/// Storage over a `sqlx` SQLite pool
#[derive(Debug, Clone)]
pub struct SqlStorage {
    pool: DbPool,
    clusters: ClusterRepository,
    configurations: ConfigurationRepository,
}

impl SqlStorage {
    pub fn new(pool: DbPool) -> Self {
        Self {
            clusters: ClusterRepository::new(pool.clone()),
            configurations: ConfigurationRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn ensure_cluster(&self, cluster_id: ClusterId) -> Result<()> {
        if self.clusters.exists(cluster_id).await? {
            Ok(())
        } else {
            Err(Error::not_found(format!("Cluster with ID '{}' not found", cluster_id)))
        }
    }

    async fn set_cluster_state(
        &self,
        cluster_id: ClusterId,
        state: ActivationState,
        username: &str,
        reason: &str,
    ) -> Result<Vec<Configuration>> {
        self.ensure_cluster(cluster_id).await?;

        let touched = self
            .configurations
            .set_state_for_cluster(cluster_id, state, username, reason)
            .await?;

        info!(
            cluster_id = %cluster_id,
            state = %state,
            username = %username,
            configurations = touched,
            "Cluster configurations updated"
        );

        self.configurations.list_by_cluster(cluster_id).await
    }
}

#[async_trait]
impl Storage for SqlStorage {
    async fn ping(&self) -> Result<()> {
        check_connection(&self.pool).await
    }

    async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        self.clusters.list().await
    }

    async fn get_cluster(&self, id: ClusterId) -> Result<Cluster> {
        self.clusters.get_by_id(id).await
    }

    async fn find_cluster_by_name(&self, name: &str) -> Result<Cluster> {
        self.clusters.get_by_name(name).await
    }

    async fn create_cluster(&self, id: ClusterId, name: &str) -> Result<Cluster> {
        self.clusters.create(id, name).await
    }

    async fn delete_cluster(&self, id: ClusterId) -> Result<bool> {
        self.clusters.delete(id).await
    }

    async fn get_cluster_configuration_by_id(&self, id: ConfigurationId) -> Result<String> {
        Ok(self.configurations.get_by_id(id).await?.body)
    }

    async fn delete_cluster_configuration_by_id(&self, id: ConfigurationId) -> Result<()> {
        self.configurations.delete(id).await
    }

    async fn list_all_cluster_configurations(&self) -> Result<Vec<Configuration>> {
        self.configurations.list_all().await
    }

    async fn list_cluster_configuration(
        &self,
        cluster_id: ClusterId,
    ) -> Result<Vec<Configuration>> {
        self.ensure_cluster(cluster_id).await?;
        self.configurations.list_by_cluster(cluster_id).await
    }

    async fn enable_or_disable_cluster_configuration_by_id(
        &self,
        id: ConfigurationId,
        state: ActivationState,
    ) -> Result<()> {
        self.configurations.set_state(id, state).await?;
        info!(configuration_id = %id, state = %state, "Configuration state changed");
        Ok(())
    }

    async fn create_cluster_configuration(
        &self,
        request: NewConfiguration,
    ) -> Result<Vec<Configuration>> {
        self.ensure_cluster(request.cluster_id).await?;
        self.configurations.create(&request).await?;
        self.configurations.list_by_cluster(request.cluster_id).await
    }

    async fn enable_cluster_configuration(
        &self,
        cluster_id: ClusterId,
        username: &str,
        reason: &str,
    ) -> Result<Vec<Configuration>> {
        self.set_cluster_state(cluster_id, ActivationState::Enabled, username, reason).await
    }

    async fn disable_cluster_configuration(
        &self,
        cluster_id: ClusterId,
        username: &str,
        reason: &str,
    ) -> Result<Vec<Configuration>> {
        self.set_cluster_state(cluster_id, ActivationState::Disabled, username, reason).await
    }
}
