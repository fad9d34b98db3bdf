pub mod store;

pub use store::ResourceStore;
