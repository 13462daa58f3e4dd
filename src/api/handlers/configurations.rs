//! Cluster configuration HTTP handlers
//!
//! Every handler that changes a configuration validates its parameters first,
//! then records the action in the audit log, then calls storage. Creating a
//! configuration is audited only once storage has accepted it. A request that
//! fails validation is never audited.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use super::params::{self, ActorQuery, ClusterChangeQuery, CreateConfigurationQuery};
use crate::{
    api::{error::ApiError, routes::ApiState},
    domain::{ActivationState, Configuration, NewConfiguration},
    observability::metrics::record_configuration_change,
};

const NEW_CONFIGURATION_ACTION: &str = "NewClusterConfiguration";
const DELETE_CONFIGURATION_ACTION: &str = "DeleteClusterConfigurationById";

#[utoipa::path(
    get,
    path = "/api/v1/client/configuration",
    responses(
        (status = 200, description = "All configurations ordered by ID", body = [Configuration]),
        (status = 400, description = "Storage error", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
#[instrument(skip(state))]
pub async fn list_configurations_handler(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    Ok(Json(state.storage.list_all_cluster_configurations().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/client/configuration/{id}",
    params(("id" = i64, Path, description = "Configuration ID")),
    responses(
        (status = 200, description = "Raw configuration body", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or unknown ID", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
#[instrument(skip(state), fields(configuration_id = %id))]
pub async fn get_configuration_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = params::configuration_id(&id)?;
    let body = state.storage.get_cluster_configuration_by_id(id).await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

#[utoipa::path(
    delete,
    path = "/api/v1/client/configuration/{id}",
    params(("id" = i64, Path, description = "Configuration ID"), ActorQuery),
    responses(
        (status = 200, description = "Configuration deleted", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or unknown ID", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
#[instrument(skip(state, query), fields(configuration_id = %id))]
pub async fn delete_configuration_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<&'static str, ApiError> {
    let id = params::configuration_id(&id)?;

    state.audit.log_action(DELETE_CONFIGURATION_ACTION, query.actor(), &id.to_string());
    state.storage.delete_cluster_configuration_by_id(id).await?;
    record_configuration_change(DELETE_CONFIGURATION_ACTION).await;

    Ok("Deleted")
}

#[utoipa::path(
    put,
    path = "/api/v1/client/configuration/{id}/enable",
    params(("id" = i64, Path, description = "Configuration ID"), ActorQuery),
    responses(
        (status = 200, description = "Configuration enabled", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or unknown ID", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
pub async fn enable_configuration_handler(
    state: State<ApiState>,
    id: Path<String>,
    query: Query<ActorQuery>,
) -> Result<&'static str, ApiError> {
    change_configuration_state(state, id, query, ActivationState::Enabled).await
}

#[utoipa::path(
    put,
    path = "/api/v1/client/configuration/{id}/disable",
    params(("id" = i64, Path, description = "Configuration ID"), ActorQuery),
    responses(
        (status = 200, description = "Configuration disabled", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid or unknown ID", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
pub async fn disable_configuration_handler(
    state: State<ApiState>,
    id: Path<String>,
    query: Query<ActorQuery>,
) -> Result<&'static str, ApiError> {
    change_configuration_state(state, id, query, ActivationState::Disabled).await
}

#[instrument(skip(state, query), fields(configuration_id = %id))]
async fn change_configuration_state(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
    activation: ActivationState,
) -> Result<&'static str, ApiError> {
    let id = params::configuration_id(&id)?;

    state.audit.log_action(activation.audit_action(), query.actor(), &id.to_string());
    state.storage.enable_or_disable_cluster_configuration_by_id(id, activation).await?;
    record_configuration_change(activation.audit_action()).await;

    Ok(activation.as_str())
}

#[utoipa::path(
    get,
    path = "/api/v1/client/cluster/{id}/configuration",
    params(("id" = i64, Path, description = "Numeric cluster ID")),
    responses(
        (status = 200, description = "Configurations of the cluster", body = [Configuration]),
        (status = 400, description = "Invalid or unknown cluster", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
#[instrument(skip(state), fields(cluster_id = %cluster))]
pub async fn list_cluster_configurations_handler(
    State(state): State<ApiState>,
    Path(cluster): Path<String>,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    let cluster = params::cluster_id(&cluster)?;
    Ok(Json(state.storage.list_cluster_configuration(cluster).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/client/cluster/{id}/configuration/create",
    params(("id" = i64, Path, description = "Numeric cluster ID"), CreateConfigurationQuery),
    request_body(content = String, description = "Configuration body", content_type = "text/plain"),
    responses(
        (status = 200, description = "Updated configurations of the cluster", body = [Configuration]),
        (status = 400, description = "Missing parameter, unknown cluster or storage error", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
#[instrument(skip(state, query, body), fields(cluster_id = %cluster, body_len = body.len()))]
pub async fn create_configuration_handler(
    State(state): State<ApiState>,
    Path(cluster): Path<String>,
    Query(query): Query<CreateConfigurationQuery>,
    body: String,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    let cluster_id = params::cluster_id(&cluster)?;
    let username = params::required(query.username.as_deref(), params::MISSING_USERNAME)?;
    let reason = params::required(query.reason.as_deref(), params::MISSING_REASON)?;
    let description = params::required(query.description.as_deref(), params::MISSING_DESCRIPTION)?;
    if body.is_empty() {
        return Err(ApiError::bad_request(params::MISSING_BODY));
    }

    let request = NewConfiguration {
        cluster_id,
        username: username.to_string(),
        reason: reason.to_string(),
        description: description.to_string(),
        body,
    };
    let detail = request.body.clone();

    let configurations = state.storage.create_cluster_configuration(request).await?;
    state.audit.log_action(NEW_CONFIGURATION_ACTION, username, &detail);
    record_configuration_change(NEW_CONFIGURATION_ACTION).await;

    Ok(Json(configurations))
}

#[utoipa::path(
    put,
    path = "/api/v1/client/cluster/{id}/configuration/enable",
    params(("id" = i64, Path, description = "Numeric cluster ID"), ClusterChangeQuery),
    responses(
        (status = 200, description = "Updated configurations of the cluster", body = [Configuration]),
        (status = 400, description = "Missing parameter, unknown cluster or storage error", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
pub async fn enable_cluster_configuration_handler(
    state: State<ApiState>,
    cluster: Path<String>,
    query: Query<ClusterChangeQuery>,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    change_cluster_state(state, cluster, query, ActivationState::Enabled).await
}

#[utoipa::path(
    put,
    path = "/api/v1/client/cluster/{id}/configuration/disable",
    params(("id" = i64, Path, description = "Numeric cluster ID"), ClusterChangeQuery),
    responses(
        (status = 200, description = "Updated configurations of the cluster", body = [Configuration]),
        (status = 400, description = "Missing parameter, unknown cluster or storage error", body = String, content_type = "text/plain")
    ),
    tag = "Configurations"
)]
pub async fn disable_cluster_configuration_handler(
    state: State<ApiState>,
    cluster: Path<String>,
    query: Query<ClusterChangeQuery>,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    change_cluster_state(state, cluster, query, ActivationState::Disabled).await
}

#[instrument(skip(state, query), fields(cluster_id = %cluster))]
async fn change_cluster_state(
    State(state): State<ApiState>,
    Path(cluster): Path<String>,
    Query(query): Query<ClusterChangeQuery>,
    activation: ActivationState,
) -> Result<Json<Vec<Configuration>>, ApiError> {
    let cluster_id = params::cluster_id(&cluster)?;
    let username = params::required(query.username.as_deref(), params::MISSING_USERNAME)?;
    let reason = params::required(query.reason.as_deref(), params::MISSING_REASON)?;

    state.audit.log_action(activation.audit_action(), username, &cluster_id.to_string());

    let configurations = match activation {
        ActivationState::Enabled => {
            state.storage.enable_cluster_configuration(cluster_id, username, reason).await?
        }
        ActivationState::Disabled => {
            state.storage.disable_cluster_configuration(cluster_id, username, reason).await?
        }
    };
    record_configuration_change(activation.audit_action()).await;

    Ok(Json(configurations))
}
