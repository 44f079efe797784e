// onet-etl-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::PipelineConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["onet_etl.yaml", "onet_etl.yml"];

/// Loads the pipeline configuration for a project directory.
///
/// No config file is not an error: the built-in O*NET defaults apply.
/// `ONET_RAW_DB`, `ONET_CURATED_DB` and `ONET_SQL_DIR` are layered on top.
#[instrument(skip(project_dir))]
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    let mut config = match find_config_file(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading pipeline configuration");
            let content = fs::read_to_string(&path)?;
            parse_config(&content)?
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            PipelineConfig::default()
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<PipelineConfig, InfrastructureError> {
    // Un fichier vide équivaut aux valeurs par défaut
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides<F>(config: &mut PipelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("ONET_RAW_DB") {
        info!(old = ?config.raw_db, new = ?val, "Overriding raw store via ENV");
        config.raw_db = val;
    }
    if let Some(val) = lookup("ONET_CURATED_DB") {
        info!(old = ?config.curated_db, new = ?val, "Overriding curated store via ENV");
        config.curated_db = val;
    }
    if let Some(val) = lookup("ONET_SQL_DIR") {
        info!(old = ?config.sql_dir, new = ?val, "Overriding SQL directory via ENV");
        config.sql_dir = val;
    }
}
