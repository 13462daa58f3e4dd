use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::audit::AuditLogger;
use crate::config::ServerConfig;
use crate::observability::trace_http_requests;
use crate::storage::Storage;

use super::{
    docs,
    handlers::{
        create_cluster_handler, create_configuration_handler,
        create_configuration_named_cluster_handler, delete_cluster_handler,
        delete_configuration_handler, disable_cluster_configuration_handler,
        disable_configuration_handler, enable_cluster_configuration_handler,
        enable_configuration_handler, get_cluster_handler, get_configuration_handler,
        health_handler, list_cluster_configurations_handler, list_clusters_handler,
        list_configurations_handler, search_cluster_handler,
    },
};

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct ApiState {
    pub storage: Arc<dyn Storage>,
    pub audit: Arc<dyn AuditLogger>,
}

impl ApiState {
    pub fn new(storage: Arc<dyn Storage>, audit: Arc<dyn AuditLogger>) -> Self {
        Self { storage, audit }
    }
}

/// Route table without server-level layers
pub fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/api/v1/client/cluster", get(list_clusters_handler))
        .route("/api/v1/client/cluster/search", get(search_cluster_handler))
        .route(
            "/api/v1/client/cluster/{id}",
            get(get_cluster_handler).delete(delete_cluster_handler),
        )
        .route("/api/v1/client/cluster/{id}/{name}", post(create_cluster_handler))
        .route(
            "/api/v1/client/cluster/{id}/configuration",
            get(list_cluster_configurations_handler)
                .post(create_configuration_named_cluster_handler),
        )
        .route(
            "/api/v1/client/cluster/{id}/configuration/create",
            post(create_configuration_handler),
        )
        .route(
            "/api/v1/client/cluster/{id}/configuration/enable",
            put(enable_cluster_configuration_handler),
        )
        .route(
            "/api/v1/client/cluster/{id}/configuration/disable",
            put(disable_cluster_configuration_handler),
        )
        .route("/api/v1/client/configuration", get(list_configurations_handler))
        .route(
            "/api/v1/client/configuration/{id}",
            get(get_configuration_handler).delete(delete_configuration_handler),
        )
        .route("/api/v1/client/configuration/{id}/enable", put(enable_configuration_handler))
        .route("/api/v1/client/configuration/{id}/disable", put(disable_configuration_handler))
        .route("/health", get(health_handler))
}

/// Full router with tracing, metrics, CORS and body limit layers
pub fn build_router(state: ApiState, config: &ServerConfig) -> Router {
    let mut router = api_routes()
        .with_state(state)
        .merge(docs::docs_router())
        .layer(middleware::from_fn(trace_http_requests))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_body_size));

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
