use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::support::{read_json, send_request, setup_test_app};

#[tokio::test]
async fn health_reports_ok_when_storage_is_reachable() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn health_reports_unavailable_when_storage_is_closed() {
    let app = setup_test_app().await;
    app.storage.pool().close().await;

    let response = send_request(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = send_request(&app, Method::GET, "/api/v1/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = read_json(response).await;
    assert!(body["paths"]["/api/v1/client/cluster/{id}/configuration/create"].is_object());
}
