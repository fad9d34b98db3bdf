// hub-core/src/domain/catalog/relations.rs

use std::collections::HashMap;

use super::model::{ResourceId, ResourceRecord, ResourceRow, Tag, TagRow, Version, VersionRow};
use super::version::sort_versions;

/// Versions and tags fetched in bulk for a page of resources, grouped by owner.
/// PURE: it only reshapes rows that were already loaded.
#[derive(Debug, Default)]
pub struct RelationSet {
    versions: HashMap<ResourceId, Vec<Version>>,
    tags: HashMap<ResourceId, Vec<Tag>>,
}

impl RelationSet {
    pub fn new(version_rows: Vec<VersionRow>, tag_rows: Vec<TagRow>) -> Self {
        let mut versions: HashMap<ResourceId, Vec<Version>> = HashMap::new();
        for row in version_rows {
            versions.entry(row.resource_id).or_default().push(row.version);
        }

        let mut tags: HashMap<ResourceId, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.resource_id).or_default().push(row.tag);
        }

        Self { versions, tags }
    }

    /// Attaches relations to each row. The outer row order is kept as-is;
    /// versions end up in version order and tags in name order.
    pub fn attach(mut self, rows: Vec<ResourceRow>) -> Vec<ResourceRecord> {
        rows.into_iter()
            .map(|row| {
                let mut versions = self.versions.remove(&row.id).unwrap_or_default();
                sort_versions(&mut versions);

                let mut tags = self.tags.remove(&row.id).unwrap_or_default();
                tags.sort_by(|a, b| a.name.cmp(&b.name));

                ResourceRecord::from_row(row, versions, tags)
            })
            .collect()
    }
}
