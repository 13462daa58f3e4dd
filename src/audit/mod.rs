//! # Audit Log
//!
//! Every configuration change is recorded through an [`AuditLogger`]. The
//! Splunk client ships records to an HTTP Event Collector in the background;
//! without Splunk the records only go to the tracing subscriber.

pub mod splunk;

use std::sync::Arc;

use crate::config::AuditConfig;
use crate::errors::Result;

pub use splunk::{AuditRecord, SplunkClient, SplunkEvent};

/// Sink for administrative actions.
///
/// Implementations must not block the caller and never report failure back.
pub trait AuditLogger: Send + Sync {
    fn log_action(&self, action: &str, actor: &str, detail: &str);
}

/// Audit logger that emits records as structured tracing events
#[derive(Debug, Clone, Default)]
pub struct TracingAuditLogger;

impl AuditLogger for TracingAuditLogger {
    fn log_action(&self, action: &str, actor: &str, detail: &str) {
        tracing::info!(
            target: "cfgplane::audit",
            action = %action,
            user = %actor,
            detail = %detail,
            "Audit event"
        );
    }
}

/// Build the audit logger selected by configuration
pub fn build_audit_logger(config: &AuditConfig) -> Result<Arc<dyn AuditLogger>> {
    if config.splunk_enabled {
        tracing::info!(
            address = %config.address,
            index = %config.index,
            "Sending audit events to Splunk"
        );
        Ok(Arc::new(SplunkClient::new(config)?))
    } else {
        tracing::info!("Splunk disabled, audit events are logged locally");
        Ok(Arc::new(TracingAuditLogger))
    }
}
