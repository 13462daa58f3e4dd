use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::api::handlers::HealthResponse;
use crate::domain::{Cluster, ClusterId, Configuration, ConfigurationId};

#[derive(OpenApi)]
#[openapi(
    info(title = "cfgplane", description = "Cluster configuration management API"),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::clusters::list_clusters_handler,
        crate::api::handlers::clusters::create_cluster_handler,
        crate::api::handlers::clusters::get_cluster_handler,
        crate::api::handlers::clusters::search_cluster_handler,
        crate::api::handlers::clusters::delete_cluster_handler,
        crate::api::handlers::configurations::list_configurations_handler,
        crate::api::handlers::configurations::get_configuration_handler,
        crate::api::handlers::configurations::delete_configuration_handler,
        crate::api::handlers::configurations::enable_configuration_handler,
        crate::api::handlers::configurations::disable_configuration_handler,
        crate::api::handlers::configurations::list_cluster_configurations_handler,
        crate::api::handlers::configurations::create_configuration_handler,
        crate::api::handlers::configurations::enable_cluster_configuration_handler,
        crate::api::handlers::configurations::disable_cluster_configuration_handler
    ),
    components(schemas(HealthResponse, Cluster, ClusterId, Configuration, ConfigurationId)),
    tags(
        (name = "health", description = "Service health"),
        (name = "Clusters", description = "Operations for managing clusters"),
        (name = "Configurations", description = "Operations for managing cluster configurations")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/api/v1/openapi.json", get(openapi_json))
}
