// hub/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hub")]
#[command(about = "Query a versioned resource catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Finds resources by name, type or both
    Query {
        /// Case-insensitive substring of the resource name
        #[arg(long, short)]
        name: Option<String>,

        /// Resource type (task, pipeline...), case-insensitive
        #[arg(long = "type", short = 't')]
        kind: Option<String>,

        /// Maximum number of resources (defaults to the configured limit)
        #[arg(long, short)]
        limit: Option<u32>,

        /// Path to the DuckDB database file (overrides configuration)
        #[arg(long)]
        db_path: Option<String>,

        /// Directory holding hub.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
