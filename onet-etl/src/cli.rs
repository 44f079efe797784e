// onet-etl/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "onet-etl")]
#[command(about = "O*NET extract, clean and load pipeline over SQLite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory (holds sql_scripts/, the stores and onet_etl.yaml)
    #[arg(long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Raw,
    Curated,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📥 Runs the SQL scripts that build the raw store
    Extract,

    /// 🧹 Cleans raw tables and loads the curated fact/dim tables
    Transform {
        /// Record tables that fail to read or clean and keep loading the rest
        #[arg(long)]
        keep_going: bool,
    },

    /// 📊 Prints the analytical reports over the curated store
    Insights,

    /// 🧪 Runs the data-quality checks over the curated store
    Validate {
        /// Exit with an error if any check reports issues
        #[arg(long)]
        strict: bool,
    },

    /// 🚀 Extract, transform, insights and validate in one go
    Run {
        #[arg(long)]
        keep_going: bool,

        #[arg(long)]
        strict: bool,
    },

    /// 🔍 Inspects a table (schema + sample rows)
    Inspect {
        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Which store to read from
        #[arg(long, value_enum, default_value_t = StoreKind::Curated)]
        db: StoreKind,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },
}
