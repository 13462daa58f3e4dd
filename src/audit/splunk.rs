//! Splunk HTTP Event Collector client

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::AuditLogger;
use crate::config::AuditConfig;
use crate::errors::{Error, Result};

const COLLECTOR_PATH: &str = "/services/collector/event";

/// Audit payload carried inside a HEC event
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub action: String,
    pub user: String,
    pub detail: String,
}

/// HEC event envelope
#[derive(Debug, Clone, Serialize)]
pub struct SplunkEvent {
    pub event: AuditRecord,
    pub source: String,
    pub sourcetype: String,
    pub index: String,
    /// Seconds since the epoch
    pub time: i64,
}

/// Fire-and-forget audit logger posting to Splunk
#[derive(Debug, Clone)]
pub struct SplunkClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    source: String,
    source_type: String,
    index: String,
}

impl SplunkClient {
    pub fn new(config: &AuditConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::transport(format!("Failed to build Splunk HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.address.trim_end_matches('/'), COLLECTOR_PATH),
            token: config.token.clone(),
            source: config.source.clone(),
            source_type: config.source_type.clone(),
            index: config.index.clone(),
        })
    }

    /// Full collector URL events are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn event(&self, action: &str, actor: &str, detail: &str) -> SplunkEvent {
        SplunkEvent {
            event: AuditRecord {
                action: action.to_string(),
                user: actor.to_string(),
                detail: detail.to_string(),
            },
            source: self.source.clone(),
            sourcetype: self.source_type.clone(),
            index: self.index.clone(),
            time: chrono::Utc::now().timestamp(),
        }
    }

    /// Post one event and wait for the collector's answer
    pub async fn send(&self, event: &SplunkEvent) -> Result<reqwest::StatusCode> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Splunk {}", self.token))
            .json(event)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Splunk delivery failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(format!("Splunk returned error status: {}", status)));
        }

        Ok(status)
    }
}

impl AuditLogger for SplunkClient {
    fn log_action(&self, action: &str, actor: &str, detail: &str) {
        let event = self.event(action, actor, detail);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(action = %action, user = %actor, "No async runtime, audit event dropped");
            return;
        };

        let client = self.clone();
        runtime.spawn(async move {
            match client.send(&event).await {
                Ok(status) => debug!(
                    action = %event.event.action,
                    status_code = status.as_u16(),
                    "Audit event delivered to Splunk"
                ),
                Err(e) => warn!(
                    action = %event.event.action,
                    user = %event.event.user,
                    error = %e,
                    "Failed to deliver audit event to Splunk"
                ),
            }
        });
    }
}
