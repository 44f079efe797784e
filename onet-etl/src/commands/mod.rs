// onet-etl/src/commands/mod.rs

pub mod extract;
pub mod insights;
pub mod inspect;
pub mod run;
pub mod transform;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::infrastructure::adapters::SqliteStore;
use onet_etl_core::infrastructure::config::load_pipeline_config;

pub fn load_config(project_dir: &Path) -> anyhow::Result<PipelineConfig> {
    load_pipeline_config(project_dir).with_context(|| {
        format!(
            "Failed to load pipeline configuration from {:?}",
            project_dir
        )
    })
}

/// Opens a store that an earlier stage must have produced.
pub(crate) fn open_existing(db_path: &Path, produced_by: &str) -> anyhow::Result<SqliteStore> {
    if !db_path.exists() {
        anyhow::bail!(
            "❌ Database not found at: {}\n👉 Have you run 'onet-etl {}'?",
            db_path.display(),
            produced_by
        );
    }
    Ok(SqliteStore::open_read_only(db_path)?)
}
