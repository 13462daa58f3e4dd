//! Request parameter extraction shared by the handlers
//!
//! Path segments arrive as raw strings so that a malformed ID produces the
//! same plain-text 400 as every other validation failure.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiError;
use crate::domain::{ClusterId, ConfigurationId};

pub const MISSING_CLUSTER_ID: &str = "Cluster ID needs to be specified";
pub const MISSING_CONFIGURATION_ID: &str = "Configuration ID needs to be specified";
pub const MISSING_USERNAME: &str = "User name needs to be specified";
pub const MISSING_REASON: &str = "Reason needs to be specified";
pub const MISSING_DESCRIPTION: &str = "Description needs to be specified";
pub const MISSING_BODY: &str = "Configuration needs to be provided in the request body";

/// Actor used in audit records when the caller does not name one
pub const ANONYMOUS_USER: &str = "anonymous";

pub fn cluster_id(raw: &str) -> Result<ClusterId, ApiError> {
    parse_id(raw, "cluster", MISSING_CLUSTER_ID)
}

pub fn configuration_id(raw: &str) -> Result<ConfigurationId, ApiError> {
    parse_id(raw, "configuration", MISSING_CONFIGURATION_ID)
}

fn parse_id<T>(raw: &str, kind: &str, missing: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    if raw.trim().is_empty() {
        return Err(ApiError::bad_request(missing));
    }
    raw.parse::<T>()
        .map_err(|e| ApiError::bad_request(format!("Invalid {} ID '{}': {}", kind, raw, e)))
}

/// A required query value; absent and empty are treated alike
pub fn required<'a>(value: Option<&'a str>, missing: &str) -> Result<&'a str, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::bad_request(missing)),
    }
}

/// Query parameters for creating a configuration
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CreateConfigurationQuery {
    /// Who is making the change
    pub username: Option<String>,
    /// Why the change is made
    pub reason: Option<String>,
    /// Free-form description of the configuration
    pub description: Option<String>,
}

/// Query parameters for enabling or disabling all configurations of a cluster
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClusterChangeQuery {
    pub username: Option<String>,
    pub reason: Option<String>,
}

/// Optional actor for single-configuration changes
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActorQuery {
    pub username: Option<String>,
}

impl ActorQuery {
    pub fn actor(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => ANONYMOUS_USER,
        }
    }
}

/// Cluster lookup by ID or name
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClusterSearchQuery {
    pub id: Option<String>,
    pub name: Option<String>,
}
