// hub-core/src/ports/store.rs

// This file defines what the query service needs from persistence, without knowing how it's done.
// Ordering, filtering and limits travel as a structured ResourceQuery; SQL only exists in adapters.

use crate::domain::catalog::filter::ResourceQuery;
use crate::domain::catalog::model::{ResourceId, ResourceRow, TagRow, VersionRow};
use crate::error::HubError;
use async_trait::async_trait;

/// Read-only access to the resource catalog.
///
/// Relations are fetched in batches keyed by resource id: one call per
/// relation for the whole page, never one per resource.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Resources (joined with their catalog) matching `query`, in the
    /// query's order, capped at its limit.
    async fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<ResourceRow>, HubError>;

    /// All versions of the given resources. Order is not significant.
    async fn fetch_versions(&self, resource_ids: &[ResourceId]) -> Result<Vec<VersionRow>, HubError>;

    /// All tags attached to the given resources. Order is not significant.
    async fn fetch_tags(&self, resource_ids: &[ResourceId]) -> Result<Vec<TagRow>, HubError>;

    fn engine_name(&self) -> &str;
}
