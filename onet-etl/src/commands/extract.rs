// onet-etl/src/commands/extract.rs
//
// USE CASE: Build the raw store from the SQL scripts.

use std::path::Path;

use onet_etl_core::application::{ExtractReport, execute_sql_scripts, resolve_scripts};
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::infrastructure::adapters::SqliteStore;

pub fn stage(project_dir: &Path, config: &PipelineConfig) -> anyhow::Result<ExtractReport> {
    let db_path = config.raw_db_path(project_dir);
    let sql_dir = config.sql_dir_path(project_dir);
    let scripts = resolve_scripts(config, project_dir)?;

    println!(
        "📥 Extracting {} scripts from {} into {}",
        scripts.len(),
        sql_dir.display(),
        db_path.display()
    );

    let store = SqliteStore::open(&db_path)?;
    let report = execute_sql_scripts(store, &sql_dir, &scripts)?;

    println!(
        "   {} executed, {} failed, {} skipped",
        report.executed.len(),
        report.failed.len(),
        report.skipped.len()
    );
    for (file, error) in &report.failed {
        println!("   ⚠️  {}: {}", file, error);
    }
    for file in &report.skipped {
        println!("   ⚠️  {}: not found or empty", file);
    }
    Ok(report)
}

/// Script failures are reported but do not fail the command.
pub fn execute(project_dir: &Path, config: &PipelineConfig) -> anyhow::Result<()> {
    stage(project_dir, config)?;
    Ok(())
}
