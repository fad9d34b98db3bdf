// hub-core/src/infrastructure/adapters/memory.rs

use async_trait::async_trait;
use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::catalog::filter::ResourceQuery;
use crate::domain::catalog::model::{ResourceId, ResourceRow, Tag, TagRow, Version, VersionRow};
use crate::error::HubError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::store::ResourceStore;

/// Store backed by plain vectors. Evaluates [`ResourceQuery`] in process and
/// counts round trips, so the query path can be exercised without a database.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    resources: Vec<ResourceRow>,
    versions: Vec<VersionRow>,
    tags: Vec<TagRow>,
    failure: Option<String>,
    round_trips: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with a connection error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, row: ResourceRow) -> Self {
        self.resources.push(row);
        self
    }

    pub fn with_version(mut self, resource_id: ResourceId, version: Version) -> Self {
        self.versions.push(VersionRow {
            resource_id,
            version,
        });
        self
    }

    pub fn with_tag(mut self, resource_id: ResourceId, tag: Tag) -> Self {
        self.tags.push(TagRow { resource_id, tag });
        self
    }

    /// Number of store calls served so far.
    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), HubError> {
        self.round_trips.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(HubError::Infrastructure(InfrastructureError::Io(
                std::io::Error::new(ErrorKind::ConnectionRefused, message.clone()),
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ResourceStore for InMemoryStore {
    async fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<ResourceRow>, HubError> {
        self.begin()?;

        let mut rows: Vec<ResourceRow> = self
            .resources
            .iter()
            .filter(|row| query.matches(row))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query.compare(a, b));
        rows.truncate(query.limit as usize);
        Ok(rows)
    }

    async fn fetch_versions(&self, resource_ids: &[ResourceId]) -> Result<Vec<VersionRow>, HubError> {
        self.begin()?;
        Ok(self
            .versions
            .iter()
            .filter(|row| resource_ids.contains(&row.resource_id))
            .cloned()
            .collect())
    }

    async fn fetch_tags(&self, resource_ids: &[ResourceId]) -> Result<Vec<TagRow>, HubError> {
        self.begin()?;
        Ok(self
            .tags
            .iter()
            .filter(|row| resource_ids.contains(&row.resource_id))
            .cloned()
            .collect())
    }

    fn engine_name(&self) -> &str {
        "memory"
    }
}
