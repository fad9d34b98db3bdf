// hub-core/src/domain/catalog/model.rs

use chrono::{DateTime, Utc};

pub type ResourceId = i64;

/// The source collection a resource was ingested from.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub id: i64,
    pub catalog_type: String,
}

/// A resource as returned by the store, before its relations are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRow {
    pub id: ResourceId,
    pub name: String,
    pub kind: String,
    pub rating: f64,
    pub catalog: Catalog,
}

/// One released version of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Version {
    pub id: i64,
    pub version: String,
    pub description: String,
    pub display_name: String,
    pub min_pipelines_version: String,
    /// Web (browsing) URL of the version's definition file.
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Version row keyed by its owning resource (batch fetch output).
#[derive(Debug, Clone, PartialEq)]
pub struct VersionRow {
    pub resource_id: ResourceId,
    pub version: Version,
}

/// Tag row keyed by the resource it is attached to (batch fetch output).
#[derive(Debug, Clone, PartialEq)]
pub struct TagRow {
    pub resource_id: ResourceId,
    pub tag: Tag,
}

/// A fully loaded resource: catalog, ordered versions and ordered tags.
///
/// `versions` is sorted ascending by [`VersionKey`](super::version::VersionKey),
/// so the last element is the latest release. `tags` is sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub name: String,
    pub kind: String,
    pub rating: f64,
    pub catalog: Catalog,
    pub versions: Vec<Version>,
    pub tags: Vec<Tag>,
}

impl ResourceRecord {
    pub fn from_row(row: ResourceRow, versions: Vec<Version>, tags: Vec<Tag>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            kind: row.kind,
            rating: row.rating,
            catalog: row.catalog,
            versions,
            tags,
        }
    }
}
