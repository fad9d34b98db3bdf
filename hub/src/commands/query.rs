// hub/src/commands/query.rs
//
// USE CASE: Find resources in the catalog (name / type filters).

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use std::path::{Path, PathBuf};
use tracing::info;

use hub_core::application::{QueryError, query_resources};
use hub_core::domain::catalog::{QueryCriteria, ResourceView};
use hub_core::infrastructure::adapters::DuckDBStore;
use hub_core::infrastructure::config::load_service_config;

use crate::cli::OutputFormat;

pub struct QueryArgs {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub limit: Option<u32>,
    pub db_path: Option<String>,
    pub project_dir: PathBuf,
    pub format: OutputFormat,
}

pub async fn execute(args: QueryArgs) -> anyhow::Result<()> {
    let config = load_service_config(&args.project_dir).with_context(|| {
        format!(
            "Failed to load service configuration from {:?}",
            args.project_dir
        )
    })?;

    let db_path = args.db_path.unwrap_or(config.db_path);
    if !Path::new(&db_path).exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Point --db-path (or HUB_DB_PATH) at a catalog database.",
            db_path
        );
    }

    info!(db = %db_path, "Opening catalog database");
    let store = DuckDBStore::new(&db_path)
        .with_context(|| format!("Failed to open DuckDB at {}", db_path))?;

    let criteria = QueryCriteria {
        name: args.name,
        kind: args.kind,
        limit: args.limit.unwrap_or(config.default_limit),
    };

    match query_resources(&store, &criteria).await {
        Ok(views) => {
            match args.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&views)?),
                OutputFormat::Table => println!("{}", render_table(&views)),
            }
            Ok(())
        }
        Err(QueryError::NotFound) => {
            eprintln!("🔍 No resources matched the given filters.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Query failed: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
}

fn render_table(views: &[ResourceView]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Name", "Type", "Catalog", "Rating", "Latest", "Tags", "Raw URL",
    ]);

    for view in views {
        let tags: Vec<&str> = view.tags.iter().map(|t| t.name.as_str()).collect();
        table.add_row(vec![
            view.name.clone(),
            view.kind.clone(),
            view.catalog.catalog_type.clone(),
            format!("{:.1}", view.rating),
            view.latest_version.version.clone(),
            tags.join(", "),
            view.latest_version.raw_url.clone(),
        ]);
    }

    table
}
