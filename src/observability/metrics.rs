//! # Metrics Collection
//!
//! Prometheus metrics for the HTTP API, configuration changes and the
//! database pool.

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};
use crate::storage::PoolStats;
use ::tracing::{info, warn};
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tokio::sync::RwLock;

/// Metrics recorder that tracks application metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder;

impl MetricsRecorder {
    /// Create a new metrics recorder instance
    pub fn new() -> Self {
        Self
    }

    /// Record an HTTP request
    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration: f64) {
        counter!(
            "http_requests_total",
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "http_request_duration_seconds",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .record(duration);
    }

    /// Record a configuration change accepted by the API
    pub fn record_configuration_change(&self, action: &str) {
        counter!("configuration_changes_total", "action" => action.to_string()).increment(1);
    }

    /// Update database pool gauges
    pub fn update_db_connections(&self, stats: &PoolStats) {
        gauge!("db_connections_active").set(stats.active() as f64);
        gauge!("db_connections_idle").set(stats.idle as f64);
    }

    fn describe(&self) {
        describe_counter!(
            "http_requests_total",
            Unit::Count,
            "HTTP requests by method, path and status"
        );
        describe_histogram!(
            "http_request_duration_seconds",
            Unit::Seconds,
            "HTTP request latency by method and path"
        );
        describe_counter!(
            "configuration_changes_total",
            Unit::Count,
            "Configuration changes grouped by audit action"
        );
        describe_gauge!("db_connections_active", Unit::Count, "Database connections in use");
        describe_gauge!("db_connections_idle", Unit::Count, "Idle database connections");
    }
}

static METRICS: RwLock<Option<MetricsRecorder>> = RwLock::const_new(None);

/// Install the Prometheus exporter and the global recorder
pub async fn init_metrics(config: &ObservabilityConfig) -> Result<()> {
    if !config.enable_metrics {
        return Ok(());
    }

    let metrics_addr = match config.metrics_bind_address() {
        Some(addr) => addr,
        None => {
            warn!("Metrics disabled: no bind address configured");
            return Ok(());
        }
    };

    let socket_addr: SocketAddr = metrics_addr.parse().map_err(|e| {
        Error::config(format!("Invalid metrics bind address '{}': {}", metrics_addr, e))
    })?;

    PrometheusBuilder::new()
        .with_http_listener(socket_addr)
        .add_global_label("service", &config.service_name)
        .install()
        .map_err(|e| Error::config(format!("Failed to initialize metrics exporter: {}", e)))?;

    let recorder = MetricsRecorder::new();
    recorder.describe();
    *METRICS.write().await = Some(recorder);

    info!(
        metrics_addr = %metrics_addr,
        service_name = %config.service_name,
        "Metrics collection initialized"
    );

    Ok(())
}

/// Get the global metrics recorder
pub async fn get_metrics() -> Option<MetricsRecorder> {
    METRICS.read().await.clone()
}

/// Record an HTTP request using the global metrics recorder
pub async fn record_http_request(method: &str, path: &str, status: u16, duration: f64) {
    if let Some(metrics) = get_metrics().await {
        metrics.record_http_request(method, path, status, duration);
    }
}

/// Record a configuration change using the global metrics recorder
pub async fn record_configuration_change(action: &str) {
    if let Some(metrics) = get_metrics().await {
        metrics.record_configuration_change(action);
    }
}

/// Update pool gauges using the global metrics recorder
pub async fn update_db_connections(stats: &PoolStats) {
    if let Some(metrics) = get_metrics().await {
        metrics.update_db_connections(stats);
    }
}
