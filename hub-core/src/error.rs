// hub-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    // --- ERREURS DU DOMAINE (Versions, Criteria) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (Store, IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl From<DatabaseError> for HubError {
    fn from(err: DatabaseError) -> Self {
        HubError::Infrastructure(InfrastructureError::Database(err))
    }
}
