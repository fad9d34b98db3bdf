// hub-core/src/application/loader.rs

use std::time::Instant;
use tracing::{debug, instrument};

use crate::domain::catalog::filter::ResourceQuery;
use crate::domain::catalog::model::{ResourceId, ResourceRecord};
use crate::domain::catalog::relations::RelationSet;
use crate::error::HubError;
use crate::ports::store::ResourceStore;

/// Runs `query` and eagerly loads catalog, versions and tags for every match.
///
/// At most three store round trips: the resource page, then versions and
/// tags for the whole page concurrently. Store errors are returned as-is.
#[instrument(skip(store, query), fields(store = store.engine_name(), limit = query.limit))]
pub async fn load_resources(
    store: &dyn ResourceStore,
    query: &ResourceQuery,
) -> Result<Vec<ResourceRecord>, HubError> {
    let start = Instant::now();

    let rows = store.find_resources(query).await?;
    if rows.is_empty() {
        debug!("No resource matched in {:.2?}", start.elapsed());
        return Ok(Vec::new());
    }

    let ids: Vec<ResourceId> = rows.iter().map(|r| r.id).collect();
    let (versions, tags) =
        futures::try_join!(store.fetch_versions(&ids), store.fetch_tags(&ids))?;

    debug!(
        resources = rows.len(),
        versions = versions.len(),
        tags = tags.len(),
        "✅ Relations loaded in {:.2?}",
        start.elapsed()
    );

    Ok(RelationSet::new(versions, tags).attach(rows))
}
