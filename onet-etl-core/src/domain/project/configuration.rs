// src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::domain::recipe::{Recipe, default_recipes, validate_unique_targets};

pub const DEFAULT_RAW_DB: &str = "raw_occupation.db";
pub const DEFAULT_CURATED_DB: &str = "curated_occupation.db";
pub const DEFAULT_SQL_DIR: &str = "sql_scripts";

/// Everything a pipeline stage needs to know about where things live and how
/// the curated tables are produced. Passed explicitly into every entry point.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[serde(rename_all = "kebab-case")]
pub struct PipelineConfig {
    #[validate(length(min = 1, message = "raw-db cannot be empty"))]
    #[serde(default = "default_raw_db")]
    pub raw_db: String,

    #[validate(length(min = 1, message = "curated-db cannot be empty"))]
    #[serde(default = "default_curated_db")]
    pub curated_db: String,

    #[serde(default = "default_sql_dir")]
    pub sql_dir: String,

    /// Ordered script list. Empty means "every *.sql file in sql-dir, by name".
    #[serde(default = "default_scripts")]
    pub scripts: Vec<String>,

    /// Abort the transform on the first table that cannot be read or reshaped.
    #[serde(default = "default_fail_fast")]
    pub fail_fast: bool,

    #[validate(nested, custom(function = "validate_unique_targets"))]
    #[serde(default = "default_recipes")]
    pub recipes: Vec<Recipe>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_db: default_raw_db(),
            curated_db: default_curated_db(),
            sql_dir: default_sql_dir(),
            scripts: default_scripts(),
            fail_fast: default_fail_fast(),
            recipes: default_recipes(),
        }
    }
}

impl PipelineConfig {
    pub fn raw_db_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.raw_db)
    }

    pub fn curated_db_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.curated_db)
    }

    pub fn sql_dir_path(&self, project_dir: &Path) -> PathBuf {
        resolve(project_dir, &self.sql_dir)
    }
}

fn resolve(project_dir: &Path, p: &str) -> PathBuf {
    let path = Path::new(p);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

fn default_raw_db() -> String {
    DEFAULT_RAW_DB.to_string()
}
fn default_curated_db() -> String {
    DEFAULT_CURATED_DB.to_string()
}
fn default_sql_dir() -> String {
    DEFAULT_SQL_DIR.to_string()
}
fn default_fail_fast() -> bool {
    true
}
fn default_scripts() -> Vec<String> {
    [
        "02_job_zone_reference.sql",
        "03_occupation_data.sql",
        "06_level_scale_anchors.sql",
        "07_occupation_level_metadata.sql",
        "11_abilities.sql",
        "12_education_training_experience.sql",
        "14_job_zones.sql",
        "15_knowledge.sql",
        "16_skills.sql",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
