pub mod service;

pub use service::{ServiceConfig, load_service_config, load_service_config_with};
