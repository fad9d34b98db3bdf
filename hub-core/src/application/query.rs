// hub-core/src/application/query.rs

use miette::Diagnostic;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::application::loader::load_resources;
use crate::domain::catalog::filter::{QueryCriteria, ResourceQuery};
use crate::domain::catalog::model::ResourceRecord;
use crate::domain::catalog::view::{ResourceView, ViewProjector};
use crate::domain::error::DomainError;
use crate::ports::store::ResourceStore;

/// Caller-facing outcome of a failed query. Store internals never leak here:
/// causes are logged before conversion.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Resource not found")]
    #[diagnostic(code(hub::query::not_found), help("Try a shorter name or another type."))]
    NotFound,

    #[error("Failed to fetch resources")]
    #[diagnostic(code(hub::query::fetch))]
    FetchFailed,

    #[error("Resource {resource_id} is not servable")]
    #[diagnostic(code(hub::query::integrity))]
    DataIntegrity { resource_id: i64 },

    #[error("Invalid query: {0}")]
    #[diagnostic(code(hub::query::criteria))]
    InvalidCriteria(String),
}

impl From<DomainError> for QueryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingVersions { resource_id, .. } => {
                QueryError::DataIntegrity { resource_id }
            }
            DomainError::InvalidCriteria(msg) => QueryError::InvalidCriteria(msg),
        }
    }
}

/// Find resources by name, type or both.
///
/// Results follow rating (desc) then name (asc). An empty match is reported
/// as [`QueryError::NotFound`], never as an empty success.
#[instrument(skip(store), fields(store = store.engine_name()))]
pub async fn query_resources(
    store: &dyn ResourceStore,
    criteria: &QueryCriteria,
) -> Result<Vec<ResourceView>, QueryError> {
    let query = ResourceQuery::from_criteria(criteria).map_err(|e| {
        warn!("Rejected query criteria: {}", e);
        QueryError::from(e)
    })?;

    let start = Instant::now();
    let records = match load_resources(store, &query).await {
        Ok(records) => records,
        Err(e) => {
            // Log the cause here; callers only ever see the generic outcome.
            error!("❌ Fetch failed after {:.2?}: {}", start.elapsed(), e);
            return Err(QueryError::FetchFailed);
        }
    };
    debug!("⚡ {} resources loaded in {:.2?}", records.len(), start.elapsed());

    report(records, &ViewProjector::default())
}

fn report(
    records: Vec<ResourceRecord>,
    projector: &ViewProjector,
) -> Result<Vec<ResourceView>, QueryError> {
    if records.is_empty() {
        return Err(QueryError::NotFound);
    }

    records
        .into_iter()
        .map(|record| {
            projector.project(record).map_err(|e| {
                error!("💥 Data integrity violation: {}", e);
                QueryError::from(e)
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::catalog::model::{Catalog, ResourceRow, Tag, Version};
    use crate::infrastructure::adapters::memory::InMemoryStore;
    use anyhow::Result;
    use chrono::{TimeZone, Utc};

    fn row(id: i64, name: &str, kind: &str, rating: f64) -> ResourceRow {
        ResourceRow {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            rating,
            catalog: Catalog {
                id: 1,
                catalog_type: "community".to_string(),
            },
        }
    }

    fn version(id: i64, raw: &str) -> Version {
        Version {
            id,
            version: raw.to_string(),
            description: format!("{} release", raw),
            display_name: "Display".to_string(),
            min_pipelines_version: "0.12.1".to_string(),
            url: format!("https://github.com/org/repo/tree/main/{}/task.yaml", raw),
            updated_at: Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
        }
    }

    /// Five tasks/pipelines with one version each, plus a richer `buildah`.
    fn catalog_store() -> InMemoryStore {
        InMemoryStore::new()
            .with_resource(row(1, "buildah", "task", 4.0))
            .with_resource(row(2, "git-clone", "task", 5.0))
            .with_resource(row(3, "Build-Pipeline", "pipeline", 4.0))
            .with_resource(row(4, "ansible", "task", 4.0))
            .with_resource(row(5, "kaniko", "Task", 2.0))
            .with_version(1, version(11, "1.2.0"))
            .with_version(1, version(12, "1.10.0"))
            .with_version(1, version(13, "1.3.0"))
            .with_version(2, version(21, "0.1"))
            .with_version(3, version(31, "0.1"))
            .with_version(4, version(41, "0.1"))
            .with_version(5, version(51, "0.1"))
            .with_tag(1, tag(1, "zeta"))
            .with_tag(1, tag(2, "alpha"))
            .with_tag(1, tag(3, "mu"))
    }

    fn criteria(name: Option<&str>, kind: Option<&str>, limit: u32) -> QueryCriteria {
        QueryCriteria {
            name: name.map(str::to_string),
            kind: kind.map(str::to_string),
            limit,
        }
    }

    fn names(views: &[ResourceView]) -> Vec<&str> {
        views.iter().map(|v| v.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_no_filters_returns_everything_in_rating_then_name_order() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(None, Some(""), 100)).await?;

        assert_eq!(
            names(&views),
            vec!["git-clone", "Build-Pipeline", "ansible", "buildah", "kaniko"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_type_filter_is_case_insensitive() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(None, Some("TASK"), 100)).await?;

        assert_eq!(views.len(), 4);
        assert!(views.iter().all(|v| v.kind.eq_ignore_ascii_case("task")));
        Ok(())
    }

    #[tokio::test]
    async fn test_name_filter_is_case_insensitive_substring() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(Some("BUILD"), None, 100)).await?;

        assert_eq!(names(&views), vec!["Build-Pipeline", "buildah"]);

        let both = query_resources(&store, &criteria(Some("build"), Some("pipeline"), 100)).await?;
        assert_eq!(names(&both), vec!["Build-Pipeline"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_version_uses_numeric_ordering() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(Some("buildah"), None, 100)).await?;

        let latest = &views[0].latest_version;
        assert_eq!(latest.version, "1.10.0");
        assert_eq!(latest.id, 12);
        assert_eq!(
            latest.raw_url,
            "https://raw.githubusercontent.com/org/repo/main/1.10.0/task.yaml"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_tags_are_sorted_by_name() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(Some("buildah"), None, 100)).await?;

        let tags: Vec<&str> = views[0].tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["alpha", "mu", "zeta"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let store = catalog_store();
        let result = query_resources(&store, &criteria(None, Some("nonexistent"), 100)).await;

        assert_eq!(result, Err(QueryError::NotFound));
    }

    #[tokio::test]
    async fn test_store_failure_is_opaque() {
        let store = InMemoryStore::failing("password=hunter2 host unreachable");
        let result = query_resources(&store, &criteria(None, None, 10)).await;

        assert_eq!(result, Err(QueryError::FetchFailed));
        let message = QueryError::FetchFailed.to_string();
        assert_eq!(message, "Failed to fetch resources");
        assert!(!message.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_limit_keeps_top_n() -> Result<()> {
        let store = catalog_store();
        let views = query_resources(&store, &criteria(None, None, 2)).await?;

        assert_eq!(names(&views), vec!["git-clone", "Build-Pipeline"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_repeated_queries_are_identical() -> Result<()> {
        let store = catalog_store();
        let first = query_resources(&store, &criteria(Some("a"), None, 100)).await?;
        let second = query_resources(&store, &criteria(Some("a"), None, 100)).await?;

        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_versions_is_reported_not_panicked() {
        let store = InMemoryStore::new().with_resource(row(7, "orphan", "task", 1.0));
        let result = query_resources(&store, &criteria(None, None, 10)).await;

        assert_eq!(result, Err(QueryError::DataIntegrity { resource_id: 7 }));
    }

    #[tokio::test]
    async fn test_limit_above_a_thousand_is_honoured() -> Result<()> {
        let mut store = InMemoryStore::new();
        for id in 1..=1200 {
            store = store
                .with_resource(row(id, &format!("task-{id:04}"), "task", 1.0))
                .with_version(id, version(id * 10, "0.1"));
        }

        let views = query_resources(&store, &criteria(None, None, 1500)).await?;

        assert_eq!(views.len(), 1200);
        assert_eq!(views[0].name, "task-0001");
        assert_eq!(store.round_trips(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_limit_never_reaches_the_store() {
        let store = catalog_store();
        let result = query_resources(&store, &criteria(None, None, 0)).await;

        assert!(matches!(result, Err(QueryError::InvalidCriteria(_))));
        assert_eq!(store.round_trips(), 0);
    }
}
