//! Cluster configuration repository
//!
//! Stores configuration bodies attached to clusters together with who changed
//! them, why, and whether they are currently active.

use crate::domain::{ActivationState, ClusterId, Configuration, ConfigurationId, NewConfiguration};
use crate::errors::{Error, Result};
use crate::storage::DbPool;
use sqlx::FromRow;
use tracing::instrument;

const SELECT_CONFIGURATION: &str = "SELECT id, cluster, configuration, description, changed_by, \
     reason, active, changed_at FROM cluster_configuration";

/// Database row structure for cluster configurations
#[derive(Debug, Clone, FromRow)]
struct ConfigurationRow {
    pub id: i64,
    pub cluster: i64,
    pub configuration: String,
    pub description: String,
    pub changed_by: String,
    pub reason: String,
    pub active: bool,
    pub changed_at: chrono::DateTime<chrono::Utc>,
}

impl From<ConfigurationRow> for Configuration {
    fn from(row: ConfigurationRow) -> Self {
        Self {
            id: ConfigurationId::new(row.id),
            cluster_id: ClusterId::new(row.cluster),
            username: row.changed_by,
            reason: row.reason,
            description: row.description,
            body: row.configuration,
            active: row.active,
            changed_at: row.changed_at,
        }
    }
}

/// Repository for cluster configuration data access
#[derive(Debug, Clone)]
pub struct ConfigurationRepository {
    pool: DbPool,
}

impl ConfigurationRepository {
    /// Create a new configuration repository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new, inactive configuration and return its ID
    #[instrument(
        skip(self, request),
        fields(cluster_id = %request.cluster_id, username = %request.username),
        name = "db_create_configuration"
    )]
    pub async fn create(&self, request: &NewConfiguration) -> Result<ConfigurationId> {
        let now = chrono::Utc::now();

        let result = sqlx::query(
            "INSERT INTO cluster_configuration \
             (cluster, configuration, description, changed_by, reason, active, changed_at) \
             VALUES ($1, $2, $3, $4, $5, 0, $6)",
        )
        .bind(request.cluster_id)
        .bind(&request.body)
        .bind(&request.description)
        .bind(&request.username)
        .bind(&request.reason)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                cluster_id = %request.cluster_id,
                "Failed to create configuration"
            );
            Error::database(
                e,
                format!("Failed to create configuration for cluster '{}'", request.cluster_id),
            )
        })?;

        let id = ConfigurationId::new(result.last_insert_rowid());
        tracing::info!(
            configuration_id = %id,
            cluster_id = %request.cluster_id,
            username = %request.username,
            body_len = request.body.len(),
            "Created new cluster configuration"
        );

        Ok(id)
    }

    /// Get a configuration by ID
    #[instrument(skip(self), fields(configuration_id = %id), name = "db_get_configuration_by_id")]
    pub async fn get_by_id(&self, id: ConfigurationId) -> Result<Configuration> {
        let sql = format!("{SELECT_CONFIGURATION} WHERE id = $1");
        let row = sqlx::query_as::<_, ConfigurationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    configuration_id = %id,
                    "Failed to get configuration by ID"
                );
                Error::database(e, format!("Failed to get configuration with ID '{}'", id))
            })?;

        match row {
            Some(row) => Ok(Configuration::from(row)),
            None => Err(Self::not_found(id)),
        }
    }

    /// List every configuration ordered by ID
    #[instrument(skip(self), name = "db_list_configurations")]
    pub async fn list_all(&self) -> Result<Vec<Configuration>> {
        let sql = format!("{SELECT_CONFIGURATION} ORDER BY id");
        let rows = sqlx::query_as::<_, ConfigurationRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list configurations");
                Error::database(e, "Failed to list configurations")
            })?;

        Ok(rows.into_iter().map(Configuration::from).collect())
    }

    /// List configurations of one cluster ordered by ID
    #[instrument(skip(self), fields(cluster_id = %cluster_id), name = "db_list_cluster_configurations")]
    pub async fn list_by_cluster(&self, cluster_id: ClusterId) -> Result<Vec<Configuration>> {
        let rows = sqlx::query_as::<_, ConfigurationRow>(&format!(
            "{SELECT_CONFIGURATION} WHERE cluster = $1 ORDER BY id"
        ))
        .bind(cluster_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                cluster_id = %cluster_id,
                "Failed to list cluster configurations"
            );
            Error::database(
                e,
                format!("Failed to list configurations for cluster '{}'", cluster_id),
            )
        })?;

        Ok(rows.into_iter().map(Configuration::from).collect())
    }

    /// Delete a configuration by ID
    #[instrument(skip(self), fields(configuration_id = %id), name = "db_delete_configuration")]
    pub async fn delete(&self, id: ConfigurationId) -> Result<()> {
        let result = sqlx::query("DELETE FROM cluster_configuration WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    configuration_id = %id,
                    "Failed to delete configuration"
                );
                Error::database(e, format!("Failed to delete configuration with ID '{}'", id))
            })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }

        tracing::info!(configuration_id = %id, "Deleted cluster configuration");
        Ok(())
    }

    /// Set the activation state of a single configuration
    #[instrument(
        skip(self),
        fields(configuration_id = %id, state = %state),
        name = "db_set_configuration_state"
    )]
    pub async fn set_state(&self, id: ConfigurationId, state: ActivationState) -> Result<()> {
        let result = sqlx::query(
            "UPDATE cluster_configuration SET active = $1, changed_at = $2 WHERE id = $3",
        )
        .bind(state.is_active())
        .bind(chrono::Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                configuration_id = %id,
                "Failed to update configuration state"
            );
            Error::database(e, format!("Failed to update configuration with ID '{}'", id))
        })?;

        if result.rows_affected() == 0 {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    /// Set the activation state of every configuration of a cluster, recording
    /// who changed it and why. Returns the number of configurations touched.
    #[instrument(
        skip(self, reason),
        fields(cluster_id = %cluster_id, state = %state, username = %username),
        name = "db_set_cluster_configuration_state"
    )]
    pub async fn set_state_for_cluster(
        &self,
        cluster_id: ClusterId,
        state: ActivationState,
        username: &str,
        reason: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE cluster_configuration \
             SET active = $1, changed_by = $2, reason = $3, changed_at = $4 \
             WHERE cluster = $5",
        )
        .bind(state.is_active())
        .bind(username)
        .bind(reason)
        .bind(chrono::Utc::now())
        .bind(cluster_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                cluster_id = %cluster_id,
                "Failed to update cluster configurations"
            );
            Error::database(
                e,
                format!("Failed to update configurations for cluster '{}'", cluster_id),
            )
        })?;

        Ok(result.rows_affected())
    }

    fn not_found(id: ConfigurationId) -> Error {
        Error::not_found(format!("Configuration with ID '{}' not found", id))
    }
}
