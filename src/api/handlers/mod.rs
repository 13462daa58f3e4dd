//! HTTP request handlers organized by resource type

pub mod clusters;
pub mod configurations;
pub mod health;
pub mod params;

pub use clusters::{
    create_cluster_handler, create_configuration_named_cluster_handler, delete_cluster_handler,
    get_cluster_handler, list_clusters_handler, search_cluster_handler,
};
pub use configurations::{
    create_configuration_handler, delete_configuration_handler,
    disable_cluster_configuration_handler, disable_configuration_handler,
    enable_cluster_configuration_handler, enable_configuration_handler,
    get_configuration_handler, list_cluster_configurations_handler, list_configurations_handler,
};
pub use health::{health_handler, HealthResponse};
