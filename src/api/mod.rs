//! # REST API
//!
//! Cluster and configuration endpoints under `/api/v1/client`, plus the
//! health check and the OpenAPI document.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::{api_routes, build_router, ApiState};
pub use server::start_api_server;
