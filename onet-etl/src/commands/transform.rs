// onet-etl/src/commands/transform.rs
//
// USE CASE: Clean the raw tables and load the curated store.

use std::path::Path;
use std::time::Instant;

use onet_etl_core::application::{TableOutcome, TransformOptions, TransformReport, run_transform};
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::infrastructure::adapters::SqliteStore;
use onet_etl_core::ports::Store;

use super::open_existing;

pub fn stage(
    project_dir: &Path,
    config: &PipelineConfig,
    keep_going: bool,
) -> anyhow::Result<TransformReport> {
    let start = Instant::now();
    let raw = open_existing(&config.raw_db_path(project_dir), "extract")?;
    let curated = SqliteStore::open(&config.curated_db_path(project_dir))?;

    let options = TransformOptions {
        fail_fast: config.fail_fast && !keep_going,
    };
    println!("🧹 Transforming {} tables...", config.recipes.len());

    let report = run_transform(&raw, &curated, &config.recipes, options)?;

    for table in &report.tables {
        match &table.outcome {
            TableOutcome::Written { rows } => {
                println!("   ✅ {} -> {} ({} rows)", table.source, table.target, rows)
            }
            TableOutcome::WriteFailed { error } => {
                println!("   ❌ {} -> {}: write failed: {}", table.source, table.target, error)
            }
            TableOutcome::TransformFailed { error } => {
                println!("   ❌ {} -> {}: {}", table.source, table.target, error)
            }
        }
    }
    println!(
        "   {} of {} tables loaded in {:.2?}",
        report.written(),
        report.tables.len(),
        start.elapsed()
    );

    curated.close()?;
    raw.close()?;
    Ok(report)
}

pub fn execute(project_dir: &Path, config: &PipelineConfig, keep_going: bool) -> anyhow::Result<()> {
    let report = stage(project_dir, config, keep_going)?;
    if !report.success() {
        eprintln!(
            "\n❌ FAILURE. {} tables were not loaded.",
            report.failures().count()
        );
        std::process::exit(1);
    }
    Ok(())
}
