//! Cluster HTTP handlers
//!
//! Clusters are created with a client-chosen numeric ID and a unique name.
//! A cluster named `configuration` arrives on the static per-cluster
//! configuration path, so that path also accepts POST.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use super::params::{self, ClusterSearchQuery};
use crate::{
    api::{error::ApiError, routes::ApiState},
    domain::Cluster,
};

const CONFIGURATION_SEGMENT: &str = "configuration";

#[utoipa::path(
    get,
    path = "/api/v1/client/cluster",
    responses(
        (status = 200, description = "All clusters ordered by ID", body = [Cluster]),
        (status = 400, description = "Storage error", body = String, content_type = "text/plain")
    ),
    tag = "Clusters"
)]
#[instrument(skip(state))]
pub async fn list_clusters_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Cluster>>, ApiError> {
    let clusters = state.storage.list_clusters().await?;
    Ok(Json(clusters))
}

#[utoipa::path(
    post,
    path = "/api/v1/client/cluster/{id}/{name}",
    params(
        ("id" = i64, Path, description = "Numeric cluster ID"),
        ("name" = String, Path, description = "Unique cluster name")
    ),
    responses(
        (status = 201, description = "Cluster created", body = Cluster),
        (status = 400, description = "Invalid ID or duplicate cluster", body = String, content_type = "text/plain")
    ),
    tag = "Clusters"
)]
#[instrument(skip(state), fields(cluster_id = %id, cluster_name = %name))]
pub async fn create_cluster_handler(
    State(state): State<ApiState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Cluster>), ApiError> {
    create_cluster(&state, &id, &name).await
}

/// POST on `/cluster/{id}/configuration` creates the cluster named `configuration`
#[instrument(skip(state), fields(cluster_id = %id))]
pub async fn create_configuration_named_cluster_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Cluster>), ApiError> {
    create_cluster(&state, &id, CONFIGURATION_SEGMENT).await
}

async fn create_cluster(
    state: &ApiState,
    id: &str,
    name: &str,
) -> Result<(StatusCode, Json<Cluster>), ApiError> {
    let id = params::cluster_id(id)?;
    let cluster = state.storage.create_cluster(id, name).await?;
    Ok((StatusCode::CREATED, Json(cluster)))
}

#[utoipa::path(
    get,
    path = "/api/v1/client/cluster/{id}",
    params(("id" = i64, Path, description = "Numeric cluster ID")),
    responses(
        (status = 200, description = "Cluster", body = Cluster),
        (status = 400, description = "Invalid or unknown ID", body = String, content_type = "text/plain")
    ),
    tag = "Clusters"
)]
#[instrument(skip(state), fields(cluster_id = %id))]
pub async fn get_cluster_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Cluster>, ApiError> {
    let id = params::cluster_id(&id)?;
    Ok(Json(state.storage.get_cluster(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/client/cluster/search",
    params(ClusterSearchQuery),
    responses(
        (status = 200, description = "Matching cluster", body = Cluster),
        (status = 400, description = "No search key or no match", body = String, content_type = "text/plain")
    ),
    tag = "Clusters"
)]
#[instrument(skip(state))]
pub async fn search_cluster_handler(
    State(state): State<ApiState>,
    Query(query): Query<ClusterSearchQuery>,
) -> Result<Json<Cluster>, ApiError> {
    let cluster = match (query.id.as_deref(), query.name.as_deref()) {
        (Some(id), _) if !id.is_empty() => {
            state.storage.get_cluster(params::cluster_id(id)?).await?
        }
        (_, Some(name)) if !name.is_empty() => state.storage.find_cluster_by_name(name).await?,
        _ => return Err(ApiError::bad_request("Either cluster ID or name needs to be specified")),
    };

    Ok(Json(cluster))
}

#[utoipa::path(
    delete,
    path = "/api/v1/client/cluster/{id}",
    params(("id" = i64, Path, description = "Numeric cluster ID")),
    responses(
        (status = 202, description = "Delete accepted, whether or not the cluster existed"),
        (status = 400, description = "Invalid ID or storage error", body = String, content_type = "text/plain")
    ),
    tag = "Clusters"
)]
#[instrument(skip(state), fields(cluster_id = %id))]
pub async fn delete_cluster_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = params::cluster_id(&id)?;
    state.storage.delete_cluster(id).await?;
    Ok(StatusCode::ACCEPTED)
}
