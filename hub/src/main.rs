// hub/src/main.rs

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::query::QueryArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug hub query ... pour voir les requêtes SQL
    // Logs go to stderr so `--format json` stays parseable on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: QUERY RESOURCES ---
        Commands::Query {
            name,
            kind,
            limit,
            db_path,
            project_dir,
            format,
        } => {
            commands::query::execute(QueryArgs {
                name,
                kind,
                limit,
                db_path,
                project_dir,
                format,
            })
            .await?;
        }
    }

    Ok(())
}
