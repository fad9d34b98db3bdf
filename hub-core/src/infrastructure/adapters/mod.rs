// hub-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod memory;
pub mod schema;

pub use self::duckdb::DuckDBStore;
pub use self::memory::InMemoryStore;
