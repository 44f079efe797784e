// onet-etl/src/commands/insights.rs
//
// USE CASE: Analytical reports over the curated store.

use std::io;
use std::path::Path;

use onet_etl_core::application::{InsightsReport, run_insights};
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::domain::queries::INSIGHT_QUERIES;

use super::open_existing;

pub fn stage(project_dir: &Path, config: &PipelineConfig) -> anyhow::Result<InsightsReport> {
    let store = open_existing(&config.curated_db_path(project_dir), "transform")?;
    let report = run_insights(&store, INSIGHT_QUERIES, &mut io::stdout().lock())?;
    Ok(report)
}

pub fn execute(project_dir: &Path, config: &PipelineConfig) -> anyhow::Result<()> {
    let report = stage(project_dir, config)?;
    if report.failed() > 0 {
        println!("\n⚠️  {} of {} queries failed", report.failed(), report.queries.len());
    }
    Ok(())
}
