// hub/src/commands/mod.rs

pub mod query;
