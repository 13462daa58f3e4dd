//! Cluster domain type

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ClusterId;

/// A managed cluster. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Cluster {
    pub id: ClusterId,
    pub name: String,
}

impl Cluster {
    pub fn new(id: impl Into<ClusterId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}
