//! # Configuration Settings
//!
//! Defines the configuration structure for the cfgplane service.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Logging and metrics configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,

    /// Audit log sink configuration
    #[validate(nested)]
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        self.validate_custom()?;

        Ok(())
    }

    /// Cross-field checks the validator derive cannot express
    fn validate_custom(&self) -> Result<()> {
        if self.observability.enable_metrics && self.server.port == self.observability.metrics_port
        {
            return Err(Error::validation("Server and metrics ports cannot be the same"));
        }

        if !self.database.is_sqlite() {
            return Err(Error::validation("Database URL must start with 'sqlite:'"));
        }

        if self.audit.splunk_enabled {
            if self.audit.address.trim().is_empty() {
                return Err(Error::validation("Splunk address is required when Splunk is enabled"));
            }
            url::Url::parse(&self.audit.address).map_err(|e| {
                Error::validation(format!("Invalid Splunk address '{}': {}", self.audit.address, e))
            })?;
            if self.audit.token.trim().is_empty() {
                return Err(Error::validation("Splunk token is required when Splunk is enabled"));
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Maximum request body size in bytes
    #[validate(range(min = 1024, message = "Max body size must be at least 1KB"))]
    pub max_body_size: usize,

    /// Enable permissive CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_size: 1024 * 1024, // 1MB
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[validate(range(max = 50, message = "Min connections must be between 0 and 50"))]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[validate(range(
        min = 1,
        max = 60,
        message = "Connect timeout must be between 1 and 60 seconds"
    ))]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds (0 = no timeout)
    pub idle_timeout_seconds: u64,

    /// Enable automatic migrations
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/cfgplane.db".to_string(),
            max_connections: 10,
            min_connections: 0,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 600, // 10 minutes
            auto_migrate: true,
        }
    }
}

impl DatabaseConfig {
    /// In-memory SQLite settings; a single connection keeps the schema alive
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_seconds: 0,
            ..Default::default()
        }
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Get idle timeout as Duration (None if 0)
    pub fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_seconds))
        }
    }

    /// Check if this is a SQLite configuration
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus exporter
    pub enable_metrics: bool,

    /// Metrics server port
    pub metrics_port: u16,

    /// Service name attached to metrics
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enable_metrics: false,
            metrics_port: 9090,
            service_name: "cfgplane".to_string(),
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}

impl ObservabilityConfig {
    /// Get metrics bind address (None if disabled)
    pub fn metrics_bind_address(&self) -> Option<String> {
        if !self.enable_metrics || self.metrics_port == 0 {
            None
        } else {
            Some(format!("0.0.0.0:{}", self.metrics_port))
        }
    }
}

/// Audit log sink configuration (Splunk HTTP Event Collector)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AuditConfig {
    /// Send audit events to Splunk; when false they are only logged locally
    pub splunk_enabled: bool,

    /// Base URL of the HTTP Event Collector, e.g. `https://splunk:8088`
    pub address: String,

    /// HEC token
    pub token: String,

    /// Event source
    #[validate(length(min = 1, message = "Splunk source cannot be empty"))]
    pub source: String,

    /// Event source type
    #[validate(length(min = 1, message = "Splunk source type cannot be empty"))]
    pub source_type: String,

    /// Target index
    #[validate(length(min = 1, message = "Splunk index cannot be empty"))]
    pub index: String,

    /// Delivery timeout in seconds
    #[validate(range(min = 1, max = 60, message = "Timeout must be between 1 and 60 seconds"))]
    pub timeout_seconds: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            splunk_enabled: false,
            address: String::new(),
            token: String::new(),
            source: "cfgplane".to_string(),
            source_type: "_json".to_string(),
            index: "main".to_string(),
            timeout_seconds: 5,
        }
    }
}

impl AuditConfig {
    /// Get delivery timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
