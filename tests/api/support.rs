use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use cfgplane::{
    api::{build_router, ApiState},
    audit::AuditLogger,
    config::{DatabaseConfig, ServerConfig},
    domain::ClusterId,
    storage::{create_pool, SqlStorage, Storage},
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// One recorded audit call: (action, actor, detail)
pub type AuditCall = (String, String, String);

#[derive(Default)]
pub struct RecordingAuditLogger {
    calls: Mutex<Vec<AuditCall>>,
}

impl RecordingAuditLogger {
    pub fn calls(&self) -> Vec<AuditCall> {
        self.calls.lock().expect("audit lock").clone()
    }
}

impl AuditLogger for RecordingAuditLogger {
    fn log_action(&self, action: &str, actor: &str, detail: &str) {
        self.calls.lock().expect("audit lock").push((
            action.to_string(),
            actor.to_string(),
            detail.to_string(),
        ));
    }
}

pub struct TestApp {
    pub storage: Arc<SqlStorage>,
    pub audit: Arc<RecordingAuditLogger>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        let state = ApiState::new(self.storage.clone(), self.audit.clone());
        build_router(state, &ServerConfig::default())
    }
}

/// In-memory store seeded with clusters 0 to 4 named `cluster<N>`
pub async fn setup_test_app() -> TestApp {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.expect("create sqlite pool");
    let storage = Arc::new(SqlStorage::new(pool));

    for id in 0..=4 {
        storage
            .create_cluster(ClusterId::new(id), &format!("cluster{id}"))
            .await
            .expect("seed cluster");
    }

    TestApp { storage, audit: Arc::new(RecordingAuditLogger::default()) }
}

pub async fn send_request(
    app: &TestApp,
    method: Method,
    path: &str,
    body: Option<&str>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(path);

    let request = match body {
        Some(text) => builder
            .header("content-type", "text/plain")
            .body(Body::from(text.to_string()))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    app.router().oneshot(request).await.expect("request")
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}
