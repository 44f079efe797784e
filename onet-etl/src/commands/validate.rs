// onet-etl/src/commands/validate.rs
//
// USE CASE: Data-quality checks over the curated store.

use std::io;
use std::path::Path;

use onet_etl_core::application::{ValidationReport, run_checks};
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::domain::queries::VALIDATION_CHECKS;

use super::open_existing;

pub fn stage(project_dir: &Path, config: &PipelineConfig) -> anyhow::Result<ValidationReport> {
    let store = open_existing(&config.curated_db_path(project_dir), "transform")?;
    let report = run_checks(&store, VALIDATION_CHECKS, &mut io::stdout().lock())?;
    println!("\n{}", report.summary());
    Ok(report)
}

pub fn execute(project_dir: &Path, config: &PipelineConfig, strict: bool) -> anyhow::Result<()> {
    let report = stage(project_dir, config)?;
    if strict && report.has_issues() {
        eprintln!("\n❌ Validation reported issues (strict mode).");
        std::process::exit(1);
    }
    Ok(())
}
