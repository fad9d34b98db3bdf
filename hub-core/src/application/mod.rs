// hub-core/src/application/mod.rs

pub mod loader;
pub mod query;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Le transport (CLI, HTTP) fait simplement :
// `use hub_core::application::{query_resources, QueryError};`

pub use loader::load_resources;
pub use query::{QueryError, query_resources};
