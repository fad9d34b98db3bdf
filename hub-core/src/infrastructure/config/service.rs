// hub-core/src/infrastructure/config/service.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::catalog::filter::DEFAULT_LIMIT;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["hub.yaml", "hub_config.yaml"];

/// Upper bound for the configured page size used when no limit is given.
pub const MAX_DEFAULT_LIMIT: u32 = 1000;

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(rename = "db-path", default = "default_db_path")]
    pub db_path: String,

    #[validate(range(min = 1, max = MAX_DEFAULT_LIMIT))]
    #[serde(rename = "default-limit", default = "default_limit")]
    pub default_limit: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            db_path: default_db_path(),
            default_limit: default_limit(),
        }
    }
}

fn default_name() -> String {
    "hub".to_string()
}
fn default_db_path() -> String {
    "hub.duckdb".to_string()
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

// --- LOADER ---

/// Loads `hub.yaml` (or `hub_config.yaml`) from `project_dir`, then applies
/// `HUB_*` environment overrides. A missing file yields the defaults.
#[instrument(skip(project_dir))]
pub fn load_service_config(project_dir: &Path) -> Result<ServiceConfig, InfrastructureError> {
    load_service_config_with(project_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_service_config`] with an injectable environment lookup.
pub fn load_service_config_with<F>(
    project_dir: &Path,
    env: F,
) -> Result<ServiceConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match find_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading service configuration");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        }
        None => {
            info!(dir = ?project_dir, "No configuration file found, using defaults");
            ServiceConfig::default()
        }
    };

    // Pattern 'Layering': HUB_DB_PATH=/tmp/hub.duckdb hub query ...
    apply_env_overrides(&mut config, env)?;

    config.validate()?;
    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides<F>(config: &mut ServiceConfig, env: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("HUB_DB_PATH") {
        info!(old = ?config.db_path, new = ?val, "Overriding db path via ENV");
        config.db_path = val;
    }
    if let Some(val) = env("HUB_DEFAULT_LIMIT") {
        config.default_limit = val.trim().parse().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "HUB_DEFAULT_LIMIT must be a positive integer, got '{}'",
                val
            ))
        })?;
        info!(limit = config.default_limit, "Overriding default limit via ENV");
    }
    Ok(())
}
