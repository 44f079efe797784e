// onet-etl/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use onet_etl_core::EtlError;

fn main() {
    // RUST_LOG=debug onet-etl transform pour voir les requêtes
    // Logs go to stderr; stdout is kept for the reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = dispatch(cli) {
        match err.downcast::<EtlError>() {
            Ok(etl) => eprintln!("{:?}", miette::Report::new(etl)),
            Err(other) => eprintln!("\n💥 {:#}", other),
        }
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let project_dir = cli.project_dir;
    let config = commands::load_config(&project_dir)?;
    tracing::debug!(
        project_dir = ?project_dir,
        raw = %config.raw_db,
        curated = %config.curated_db,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Extract => commands::extract::execute(&project_dir, &config),
        Commands::Transform { keep_going } => {
            commands::transform::execute(&project_dir, &config, keep_going)
        }
        Commands::Insights => commands::insights::execute(&project_dir, &config),
        Commands::Validate { strict } => commands::validate::execute(&project_dir, &config, strict),
        Commands::Run { keep_going, strict } => {
            commands::run::execute(&project_dir, &config, keep_going, strict)
        }
        Commands::Inspect { table, db, limit } => {
            commands::inspect::execute(&project_dir, &config, &table, db, limit)
        }
    }
}
