//! Cluster configuration domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::{ClusterId, ConfigurationId};

/// A configuration blob attached to a cluster, with its audit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: ConfigurationId,
    pub cluster_id: ClusterId,
    /// Who made the last change
    pub username: String,
    pub reason: String,
    pub description: String,
    /// Opaque configuration text, stored and returned byte for byte
    pub body: String,
    pub active: bool,
    pub changed_at: DateTime<Utc>,
}

/// Everything needed to attach a new configuration to a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfiguration {
    pub cluster_id: ClusterId,
    pub username: String,
    pub reason: String,
    pub description: String,
    pub body: String,
}

/// Whether a configuration is applied to its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationState {
    Enabled,
    Disabled,
}

impl ActivationState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Action name recorded in the audit log
    pub fn audit_action(self) -> &'static str {
        match self {
            Self::Enabled => "EnableClusterConfiguration",
            Self::Disabled => "DisableClusterConfiguration",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
