use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    audit::AuditLogger,
    config::ServerConfig,
    errors::{Error, Result},
    storage::Storage,
};

use super::routes::{build_router, ApiState};

/// Bind the configured address and serve the API until Ctrl-C
pub async fn start_api_server(
    config: &ServerConfig,
    storage: Arc<dyn Storage>,
    audit: Arc<dyn AuditLogger>,
) -> Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        Error::transport(format!("Failed to bind API server to {}: {}", addr, e))
    })?;

    serve(listener, ApiState::new(storage, audit), config).await
}

/// Serve the API on an already bound listener
pub async fn serve(listener: TcpListener, state: ApiState, config: &ServerConfig) -> Result<()> {
    let router = build_router(state, config);
    let address = listener
        .local_addr()
        .map_err(|e| Error::transport(format!("Failed to read API server address: {}", e)))?;

    info!(address = %address, "Starting HTTP API server");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "API server shutdown listener failed");
            }
        })
        .await
        .map_err(|e| Error::transport(format!("API server error: {}", e)))?;

    info!("API server shutdown completed");
    Ok(())
}
