// hub-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, PartialEq)]
pub enum DomainError {
    #[error("Resource '{name}' (id {resource_id}) has no versions")]
    #[diagnostic(
        code(hub::domain::missing_versions),
        help("Every resource must be ingested with at least one version.")
    )]
    MissingVersions { resource_id: i64, name: String },

    #[error("Invalid query criteria: {0}")]
    #[diagnostic(code(hub::domain::criteria))]
    InvalidCriteria(String),
}
