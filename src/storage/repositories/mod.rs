//! Repository modules for data access
//!
//! Each repository handles the queries for a single table.

pub mod cluster;
pub mod configuration;

pub use cluster::ClusterRepository;
pub use configuration::ConfigurationRepository;
