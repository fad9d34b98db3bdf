pub mod catalog;
pub mod error;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use error::DomainError;
