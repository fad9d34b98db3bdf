// hub-core/src/domain/catalog/view.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::model::{ResourceRecord, Tag, Version};
use super::rewriter::{GITHUB_RAW, RawUrlRewriter};
use crate::domain::error::DomainError;

const UPDATED_AT_SECONDS: &str = "%Y-%m-%d %H:%M:%S";

/// Absolute UTC rendering used for `updated_at` in views:
/// `2021-02-01 10:00:00.5 +0000 UTC`. The fraction keeps only significant
/// digits and is omitted on whole seconds.
pub fn format_updated_at(at: &DateTime<Utc>) -> String {
    let mut out = at.format(UPDATED_AT_SECONDS).to_string();

    let nanos = at.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{:09}", nanos);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    out.push_str(" +0000 UTC");
    out
}

// --- VIEWS ---
// Those structures define exactly what callers receive.

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResourceView {
    pub id: i64,
    pub name: String,
    pub catalog: CatalogView,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub latest_version: VersionView,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CatalogView {
    pub id: i64,
    #[serde(rename = "type")]
    pub catalog_type: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct VersionView {
    pub id: i64,
    pub version: String,
    pub description: String,
    pub display_name: String,
    pub min_pipelines_version: String,
    pub web_url: String,
    pub raw_url: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TagView {
    pub id: i64,
    pub name: String,
}

// --- PROJECTOR ---

/// Maps loaded records to views. Holds the URL rule set; nothing else.
#[derive(Debug, Clone, Copy)]
pub struct ViewProjector {
    rewriter: &'static RawUrlRewriter,
}

impl Default for ViewProjector {
    fn default() -> Self {
        Self::new(&GITHUB_RAW)
    }
}

impl ViewProjector {
    pub fn new(rewriter: &'static RawUrlRewriter) -> Self {
        Self { rewriter }
    }

    /// Fails with [`DomainError::MissingVersions`] when the record has no
    /// version to surface.
    pub fn project(&self, mut record: ResourceRecord) -> Result<ResourceView, DomainError> {
        let latest = record
            .versions
            .pop()
            .ok_or_else(|| DomainError::MissingVersions {
                resource_id: record.id,
                name: record.name.clone(),
            })?;

        Ok(ResourceView {
            id: record.id,
            name: record.name,
            catalog: CatalogView {
                id: record.catalog.id,
                catalog_type: record.catalog.catalog_type,
            },
            kind: record.kind,
            rating: record.rating,
            latest_version: self.version_view(latest),
            tags: record.tags.into_iter().map(TagView::from).collect(),
        })
    }

    fn version_view(&self, version: Version) -> VersionView {
        VersionView {
            raw_url: self.rewriter.rewrite(&version.url),
            updated_at: format_updated_at(&version.updated_at),
            id: version.id,
            version: version.version,
            description: version.description,
            display_name: version.display_name,
            min_pipelines_version: version.min_pipelines_version,
            web_url: version.url,
        }
    }
}

impl From<Tag> for TagView {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}
