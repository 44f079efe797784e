// onet-etl/src/commands/run.rs
//
// USE CASE: Run every stage in order.

use std::path::Path;
use std::time::Instant;

use onet_etl_core::domain::project::PipelineConfig;

use super::{extract, insights, transform, validate};

pub fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    keep_going: bool,
    strict: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();

    extract::stage(project_dir, config)?;
    let loaded = transform::stage(project_dir, config, keep_going)?;
    insights::stage(project_dir, config)?;
    let checks = validate::stage(project_dir, config)?;

    if !loaded.success() {
        eprintln!(
            "\n❌ FAILURE. {} tables were not loaded.",
            loaded.failures().count()
        );
        std::process::exit(1);
    }
    if strict && checks.has_issues() {
        eprintln!("\n❌ Validation reported issues (strict mode).");
        std::process::exit(1);
    }

    println!("\n✨ SUCCESS! Pipeline finished in {:.2?}", start.elapsed());
    Ok(())
}
