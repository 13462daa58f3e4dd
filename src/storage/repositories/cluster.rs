//! Cluster repository for managing clusters
//!
//! This module provides CRUD operations for cluster resources. Clusters are
//! identified by a client-chosen numeric ID and carry a unique name.

use crate::domain::{Cluster, ClusterId};
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use sqlx::FromRow;
use tracing::instrument;

/// Database row structure for clusters
#[derive(Debug, Clone, FromRow)]
struct ClusterRow {
    pub id: i64,
    pub name: String,
}

impl From<ClusterRow> for Cluster {
    fn from(row: ClusterRow) -> Self {
        Cluster::new(row.id, row.name)
    }
}

/// Repository for cluster data access
#[derive(Debug, Clone)]
pub struct ClusterRepository {
    pool: DbPool,
}

impl ClusterRepository {
    /// Create a new cluster repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Create a new cluster with the given ID and name
    #[instrument(
        skip(self),
        fields(cluster_id = %id, cluster_name = %name),
        name = "db_create_cluster"
    )]
    pub async fn create(&self, id: ClusterId, name: &str) -> Result<Cluster> {
        sqlx::query("INSERT INTO cluster (id, name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    cluster_id = %id,
                    cluster_name = %name,
                    "Failed to create cluster"
                );
                Error::database(e, format!("Failed to create cluster '{}' with ID '{}'", name, id))
            })?;

        tracing::info!(cluster_id = %id, cluster_name = %name, "Created new cluster");

        Ok(Cluster::new(id, name))
    }

    /// Get cluster by ID
    #[instrument(skip(self), fields(cluster_id = %id), name = "db_get_cluster_by_id")]
    pub async fn get_by_id(&self, id: ClusterId) -> Result<Cluster> {
        let row = sqlx::query_as::<_, ClusterRow>("SELECT id, name FROM cluster WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, cluster_id = %id, "Failed to get cluster by ID");
                Error::database(e, format!("Failed to get cluster with ID '{}'", id))
            })?;

        match row {
            Some(row) => Ok(Cluster::from(row)),
            None => Err(Error::not_found(format!("Cluster with ID '{}' not found", id))),
        }
    }

    /// Get cluster by name
    #[instrument(skip(self), fields(cluster_name = %name), name = "db_get_cluster_by_name")]
    pub async fn get_by_name(&self, name: &str) -> Result<Cluster> {
        let row = sqlx::query_as::<_, ClusterRow>("SELECT id, name FROM cluster WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, cluster_name = %name, "Failed to get cluster by name");
                Error::database(e, format!("Failed to get cluster with name '{}'", name))
            })?;

        match row {
            Some(row) => Ok(Cluster::from(row)),
            None => Err(Error::not_found(format!("Cluster with name '{}' not found", name))),
        }
    }

    /// Whether a cluster with the given ID exists
    pub async fn exists(&self, id: ClusterId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cluster WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::database(e, format!("Failed to look up cluster '{}'", id)))?;

        Ok(count > 0)
    }

    /// List all clusters ordered by ID
    #[instrument(skip(self), name = "db_list_clusters")]
    pub async fn list(&self) -> Result<Vec<Cluster>> {
        let rows = sqlx::query_as::<_, ClusterRow>("SELECT id, name FROM cluster ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list clusters");
                Error::database(e, "Failed to list clusters")
            })?;

        Ok(rows.into_iter().map(Cluster::from).collect())
    }

    /// Delete a cluster by ID, returning whether a row was removed.
    ///
    /// Configurations of the cluster are removed with it.
    #[instrument(skip(self), fields(cluster_id = %id), name = "db_delete_cluster")]
    pub async fn delete(&self, id: ClusterId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cluster WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, cluster_id = %id, "Failed to delete cluster");
                Error::database(e, format!("Failed to delete cluster with ID '{}'", id))
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(cluster_id = %id, "Deleted cluster");
        } else {
            tracing::debug!(cluster_id = %id, "Delete requested for unknown cluster");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::create_pool;

    async fn repository() -> ClusterRepository {
        ClusterRepository::new(create_pool(&DatabaseConfig::in_memory()).await.unwrap())
    }

    #[tokio::test]
    async fn test_create_and_list_clusters() {
        let repo = repository().await;
        repo.create(ClusterId::new(2), "cluster2").await.unwrap();
        repo.create(ClusterId::new(0), "cluster0").await.unwrap();
        repo.create(ClusterId::new(1), "cluster1").await.unwrap();

        let clusters = repo.list().await.unwrap();
        assert_eq!(
            clusters,
            vec![
                Cluster::new(0_i64, "cluster0"),
                Cluster::new(1_i64, "cluster1"),
                Cluster::new(2_i64, "cluster2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_duplicate_cluster_fails() {
        let repo = repository().await;
        repo.create(ClusterId::new(1), "cluster1").await.unwrap();

        let duplicate_id = repo.create(ClusterId::new(1), "other").await.unwrap_err();
        assert!(duplicate_id.is_constraint_violation());

        let duplicate_name = repo.create(ClusterId::new(2), "cluster1").await.unwrap_err();
        assert!(duplicate_name.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_get_cluster() {
        let repo = repository().await;
        repo.create(ClusterId::new(3), "cluster3").await.unwrap();

        assert_eq!(repo.get_by_id(ClusterId::new(3)).await.unwrap().name, "cluster3");
        assert_eq!(repo.get_by_name("cluster3").await.unwrap().id, ClusterId::new(3));
        assert!(matches!(repo.get_by_id(ClusterId::new(4)).await, Err(Error::NotFound(_))));
        assert!(matches!(repo.get_by_name("missing").await, Err(Error::NotFound(_))));
        assert!(repo.exists(ClusterId::new(3)).await.unwrap());
        assert!(!repo.exists(ClusterId::new(4)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_cluster() {
        let repo = repository().await;
        repo.create(ClusterId::new(4), "cluster4").await.unwrap();

        assert!(repo.delete(ClusterId::new(4)).await.unwrap());
        assert!(!repo.delete(ClusterId::new(4)).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
