// hub-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(hub::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("DuckDB connection lock poisoned")]
    #[diagnostic(code(hub::infra::database::poisoned))]
    Poisoned,

    #[error("Timestamp out of range: {0} microseconds since epoch")]
    #[diagnostic(code(hub::infra::database::timestamp))]
    InvalidTimestamp(i64),

    #[error("Blocking database task failed: {0}")]
    #[diagnostic(code(hub::infra::database::task))]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(hub::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(hub::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(hub::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(hub::infra::config_invalid),
        help("default-limit must be between 1 and 1000.")
    )]
    Validation(#[from] validator::ValidationErrors),
}

// Shortcut for `?` on raw duckdb calls
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
