//! Domain layer
//!
//! Plain data types shared by the storage and API layers. They carry no
//! database or HTTP behavior beyond serialization.
//!
//! ## Module Organization
//!
//! - `id`: Type-safe numeric identifiers with NewType pattern
//! - `cluster`: Managed clusters
//! - `configuration`: Cluster configurations and their activation state

pub mod cluster;
pub mod configuration;
pub mod id;

pub use cluster::Cluster;
pub use configuration::{ActivationState, Configuration, NewConfiguration};
pub use id::{ClusterId, ConfigurationId};
