// hub-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use duckdb::{Config, Connection, params_from_iter};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};

// Imports Hexagonaux
use crate::domain::catalog::filter::{Predicate, ResourceQuery, SortKey};
use crate::domain::catalog::model::{
    Catalog, ResourceId, ResourceRow, Tag, TagRow, Version, VersionRow,
};
use crate::error::HubError;
use crate::infrastructure::adapters::schema::SCHEMA_DDL;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::store::ResourceStore;

pub struct DuckDBStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBStore {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a batch of statements (schema bootstrap, fixtures).
    pub fn execute_batch(&self, sql: &str) -> Result<(), InfrastructureError> {
        let conn = self.conn.lock().map_err(|_| DatabaseError::Poisoned)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    pub fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        self.execute_batch(SCHEMA_DDL)
    }

    /// Runs `work` on the blocking pool with the connection locked.
    async fn with_connection<T, F>(&self, work: F) -> Result<T, HubError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| DatabaseError::Poisoned)?;
            work(&*guard)
        })
        .await
        .map_err(DatabaseError::from)?;

        result.map_err(HubError::from)
    }
}

// --- SQL COMPILATION ---

const RESOURCE_COLUMNS: &str =
    r#"r.id, r.name, r."type", r.rating, c.id, c."type""#;

/// Turns a [`ResourceQuery`] into parameterised SQL. Needles are bound, never inlined.
pub(crate) fn compile_resource_query(query: &ResourceQuery) -> (String, Vec<String>) {
    let mut sql = format!(
        "SELECT {} FROM resources r JOIN catalogs c ON c.id = r.catalog_id",
        RESOURCE_COLUMNS
    );
    let mut params = Vec::new();

    let clauses: Vec<&str> = query
        .predicates
        .iter()
        .map(|predicate| match predicate {
            Predicate::KindEquals(kind) => {
                params.push(kind.clone());
                r#"LOWER(r."type") = ?"#
            }
            Predicate::NameContains(needle) => {
                params.push(format!("%{}%", escape_like(needle)));
                r"LOWER(r.name) LIKE ? ESCAPE '\'"
            }
        })
        .collect();

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let order: Vec<&str> = query
        .order
        .iter()
        .map(|key| match key {
            SortKey::RatingDesc => "r.rating DESC",
            SortKey::NameAsc => "r.name ASC",
        })
        .collect();
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }

    sql.push_str(&format!(" LIMIT {}", query.limit));
    (sql, params)
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

struct RawVersion {
    resource_id: ResourceId,
    id: i64,
    version: String,
    description: Option<String>,
    display_name: Option<String>,
    min_pipelines_version: Option<String>,
    url: String,
    updated_at_us: i64,
}

impl RawVersion {
    fn into_row(self) -> Result<VersionRow, DatabaseError> {
        let updated_at: DateTime<Utc> = DateTime::from_timestamp_micros(self.updated_at_us)
            .ok_or(DatabaseError::InvalidTimestamp(self.updated_at_us))?;

        Ok(VersionRow {
            resource_id: self.resource_id,
            version: Version {
                id: self.id,
                version: self.version,
                description: self.description.unwrap_or_default(),
                display_name: self.display_name.unwrap_or_default(),
                min_pipelines_version: self.min_pipelines_version.unwrap_or_default(),
                url: self.url,
                updated_at,
            },
        })
    }
}

#[async_trait]
impl ResourceStore for DuckDBStore {
    #[instrument(skip(self, query), fields(limit = query.limit, predicates = query.predicates.len()))]
    async fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<ResourceRow>, HubError> {
        let (sql, params) = compile_resource_query(query);
        debug!("⚡ Executing Query: {}", sql);
        let start = Instant::now();

        let rows = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params_from_iter(params.iter()), |row| {
                        Ok(ResourceRow {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            kind: row.get(2)?,
                            rating: row.get(3)?,
                            catalog: Catalog {
                                id: row.get(4)?,
                                catalog_type: row.get(5)?,
                            },
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(rows)
            })
            .await?;

        debug!("✅ {} resources fetched in {:.2?}", rows.len(), start.elapsed());
        Ok(rows)
    }

    #[instrument(skip(self, resource_ids), fields(resources = resource_ids.len()))]
    async fn fetch_versions(&self, resource_ids: &[ResourceId]) -> Result<Vec<VersionRow>, HubError> {
        if resource_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT v.resource_id, v.id, v.version, v.description, v.display_name, \
             v.min_pipelines_version, v.url, epoch_us(v.updated_at) \
             FROM resource_versions v WHERE v.resource_id IN ({}) \
             ORDER BY v.resource_id, v.id",
            placeholders(resource_ids.len())
        );
        let ids = resource_ids.to_vec();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let raw = stmt
                .query_map(params_from_iter(ids.iter()), |row| {
                    Ok(RawVersion {
                        resource_id: row.get(0)?,
                        id: row.get(1)?,
                        version: row.get(2)?,
                        description: row.get(3)?,
                        display_name: row.get(4)?,
                        min_pipelines_version: row.get(5)?,
                        url: row.get(6)?,
                        updated_at_us: row.get(7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            raw.into_iter().map(RawVersion::into_row).collect()
        })
        .await
    }

    #[instrument(skip(self, resource_ids), fields(resources = resource_ids.len()))]
    async fn fetch_tags(&self, resource_ids: &[ResourceId]) -> Result<Vec<TagRow>, HubError> {
        if resource_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT rt.resource_id, t.id, t.name \
             FROM resource_tags rt JOIN tags t ON t.id = rt.tag_id \
             WHERE rt.resource_id IN ({}) \
             ORDER BY rt.resource_id, t.name ASC",
            placeholders(resource_ids.len())
        );
        let ids = resource_ids.to_vec();

        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(ids.iter()), |row| {
                    Ok(TagRow {
                        resource_id: row.get(0)?,
                        tag: Tag {
                            id: row.get(1)?,
                            name: row.get(2)?,
                        },
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::catalog::filter::QueryCriteria;
    use anyhow::Result;

    const FIXTURES: &str = r#"
        INSERT INTO catalogs VALUES (1, 'tekton', 'official'), (2, 'community', 'community');
        INSERT INTO resources VALUES
            (1, 'buildah', 'task', 4.5, 1),
            (2, 'git-clone', 'task', 5.0, 1),
            (3, 'build_pipeline', 'pipeline', 3.0, 2),
            (4, 'buildpacks', 'Task', 4.5, 2);
        INSERT INTO resource_versions VALUES
            (10, 1, '0.1', 'first', 'Buildah', '0.12.1', 'https://github.com/tektoncd/catalog/tree/main/task/buildah/0.1/buildah.yaml', TIMESTAMP '2021-01-01 10:00:00'),
            (11, 1, '0.2', NULL, NULL, NULL, 'https://github.com/tektoncd/catalog/tree/main/task/buildah/0.2/buildah.yaml', TIMESTAMP '2021-02-01 10:00:00.5'),
            (20, 2, '0.1', 'clone', 'Git Clone', '0.12.1', 'https://github.com/tektoncd/catalog/tree/main/task/git-clone/0.1/git-clone.yaml', TIMESTAMP '2021-01-01 10:00:00');
        INSERT INTO tags VALUES (1, 'image-build'), (2, 'git'), (3, 'cli');
        INSERT INTO resource_tags VALUES (1, 1), (1, 3), (2, 2);
    "#;

    fn seeded_store() -> Result<DuckDBStore> {
        let store = DuckDBStore::new(":memory:")?;
        store.ensure_schema()?;
        store.execute_batch(FIXTURES)?;
        Ok(store)
    }

    fn query(name: Option<&str>, kind: Option<&str>, limit: u32) -> Result<ResourceQuery> {
        Ok(ResourceQuery::from_criteria(&QueryCriteria {
            name: name.map(str::to_string),
            kind: kind.map(str::to_string),
            limit,
        })?)
    }

    #[test]
    fn test_compile_without_filters() -> Result<()> {
        let (sql, params) = compile_resource_query(&query(None, None, 7)?);

        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY r.rating DESC, r.name ASC LIMIT 7"));
        assert!(params.is_empty());
        Ok(())
    }

    #[test]
    fn test_compile_binds_escaped_needles() -> Result<()> {
        let (sql, params) = compile_resource_query(&query(Some("50%_Off"), Some("Task"), 3)?);

        assert!(sql.contains(r#"WHERE LOWER(r."type") = ? AND LOWER(r.name) LIKE ? ESCAPE '\'"#));
        assert_eq!(params, vec!["task".to_string(), r"%50\%\_off%".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_find_resources_orders_and_filters() -> Result<()> {
        let store = seeded_store()?;

        let all = store.find_resources(&query(None, None, 10)?).await?;
        let names: Vec<&str> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["git-clone", "buildah", "buildpacks", "build_pipeline"]);
        assert_eq!(all[1].catalog.catalog_type, "official");

        let tasks = store.find_resources(&query(None, Some("TASK"), 10)?).await?;
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|r| r.kind.eq_ignore_ascii_case("task")));

        let builds = store.find_resources(&query(Some("BUILD"), Some("task"), 10)?).await?;
        let names: Vec<&str> = builds.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["buildah", "buildpacks"]);

        let limited = store.find_resources(&query(None, None, 2)?).await?;
        assert_eq!(limited.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() -> Result<()> {
        let store = seeded_store()?;

        let underscore = store.find_resources(&query(Some("d_p"), None, 10)?).await?;
        assert_eq!(underscore.len(), 1);
        assert_eq!(underscore[0].name, "build_pipeline");

        let percent = store.find_resources(&query(Some("%"), None, 10)?).await?;
        assert!(percent.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_relations() -> Result<()> {
        let store = seeded_store()?;

        let versions = store.fetch_versions(&[1, 2, 3]).await?;
        assert_eq!(versions.len(), 3);

        let second = versions
            .iter()
            .find(|v| v.version.id == 11)
            .ok_or_else(|| anyhow::anyhow!("version 11 not found"))?;
        assert_eq!(second.resource_id, 1);
        assert_eq!(second.version.description, "");
        assert_eq!(
            second.version.updated_at.to_rfc3339(),
            "2021-02-01T10:00:00.500+00:00"
        );

        let tags = store.fetch_tags(&[1, 2]).await?;
        let buildah_tags: Vec<&str> = tags
            .iter()
            .filter(|t| t.resource_id == 1)
            .map(|t| t.tag.name.as_str())
            .collect();
        assert_eq!(buildah_tags, vec!["cli", "image-build"]);

        assert!(store.fetch_tags(&[]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_schema_is_an_error() -> Result<()> {
        let store = DuckDBStore::new(":memory:")?;
        let result = store.find_resources(&query(None, None, 10)?).await;
        assert!(result.is_err());
        Ok(())
    }
}
