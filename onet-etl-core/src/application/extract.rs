// onet-etl-core/src/application/extract.rs
//
// Builds the raw store by running the extraction SQL scripts in order.

use std::path::Path;
use tracing::{error, info, warn};

use crate::domain::project::PipelineConfig;
use crate::error::EtlError;
use crate::infrastructure::fs::{discover_sql_scripts, read_sql_script};
use crate::ports::store::Store;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtractReport {
    pub executed: Vec<String>,
    /// (file, error message)
    pub failed: Vec<(String, String)>,
    pub skipped: Vec<String>,
}

impl ExtractReport {
    pub fn success(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// The scripts to run: the configured list, or every `.sql` file in the
/// script directory when the list is empty.
pub fn resolve_scripts(config: &PipelineConfig, project_dir: &Path) -> Result<Vec<String>, EtlError> {
    if !config.scripts.is_empty() {
        return Ok(config.scripts.clone());
    }
    let discovered = discover_sql_scripts(&config.sql_dir_path(project_dir))?;
    info!(count = discovered.len(), "Discovered SQL scripts");
    Ok(discovered)
}

/// Executes each script against the store, in order.
///
/// An unreadable file or a failing script is logged and the next file still
/// runs. Once every file has been attempted the store is committed and closed.
pub fn execute_sql_scripts<S: Store>(
    store: S,
    sql_dir: &Path,
    files: &[String],
) -> Result<ExtractReport, EtlError> {
    let mut report = ExtractReport::default();

    for file_name in files {
        let script = match read_sql_script(sql_dir, file_name) {
            Ok(script) => script,
            Err(e) => {
                warn!(file = %file_name, "Could not open file with error: {}", e);
                report.skipped.push(file_name.clone());
                continue;
            }
        };

        if script.trim().is_empty() {
            warn!(file = %file_name, "No SQL script returned for file");
            report.skipped.push(file_name.clone());
            continue;
        }

        match store.execute_script(&script) {
            Ok(()) => {
                info!(file = %file_name, "Executed SQL script");
                report.executed.push(file_name.clone());
            }
            Err(e) => {
                error!(file = %file_name, "Error executing SQL script: {}", e);
                report.failed.push((file_name.clone(), e.to_string()));
            }
        }
    }

    store.commit()?;
    store.close()?;

    info!(
        executed = report.executed.len(),
        failed = report.failed.len(),
        skipped = report.skipped.len(),
        "Extraction finished"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::SqliteStore;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_failing_and_missing_scripts_do_not_stop_the_run() -> Result<()> {
        let dir = tempdir()?;
        let sql_dir = dir.path().join("sql_scripts");
        fs::create_dir(&sql_dir)?;
        fs::write(
            sql_dir.join("02_job_zone_reference.sql"),
            "CREATE TABLE job_zone_reference (job_zone INTEGER, name TEXT);
             INSERT INTO job_zone_reference VALUES (1, 'Little or No Preparation Needed');",
        )?;
        fs::write(
            sql_dir.join("03_broken.sql"),
            "CREATE TABLE partial (x INTEGER); INSERT INTO nowhere VALUES (1);",
        )?;
        fs::write(sql_dir.join("04_empty.sql"), "   \n")?;
        fs::write(
            sql_dir.join("14_job_zones.sql"),
            "CREATE TABLE job_zones (onetsoc_code TEXT, job_zone INTEGER);",
        )?;

        let db_path = dir.path().join("raw.db");
        let files: Vec<String> = [
            "02_job_zone_reference.sql",
            "03_broken.sql",
            "04_empty.sql",
            "missing.sql",
            "14_job_zones.sql",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let report = execute_sql_scripts(SqliteStore::open(&db_path)?, &sql_dir, &files)?;

        assert_eq!(
            report.executed,
            vec!["02_job_zone_reference.sql", "14_job_zones.sql"]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "03_broken.sql");
        assert!(report.failed[0].1.contains("nowhere"));
        assert_eq!(report.skipped, vec!["04_empty.sql", "missing.sql"]);
        assert!(!report.success());

        let store = SqliteStore::open(&db_path)?;
        assert!(store.table_exists("job_zone_reference")?);
        assert!(store.table_exists("job_zones")?);
        // no partial-file rollback
        assert!(store.table_exists("partial")?);
        assert_eq!(store.row_count("job_zone_reference")?, 1);
        Ok(())
    }

    #[test]
    fn test_open_transaction_is_committed() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("a.sql"),
            "BEGIN TRANSACTION; CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);",
        )?;
        let db_path = dir.path().join("raw.db");
        execute_sql_scripts(SqliteStore::open(&db_path)?, dir.path(), &["a.sql".to_string()])?;

        let store = SqliteStore::open(&db_path)?;
        assert_eq!(store.row_count("t")?, 1);
        Ok(())
    }

    #[test]
    fn test_script_failing_inside_its_transaction_does_not_block_the_next() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("a.sql"),
            "BEGIN TRANSACTION; CREATE TABLE a (x INTEGER); INSERT INTO nowhere VALUES (1); COMMIT;",
        )?;
        fs::write(
            dir.path().join("b.sql"),
            "BEGIN TRANSACTION; CREATE TABLE b (y INTEGER); INSERT INTO b VALUES (2); COMMIT;",
        )?;
        let db_path = dir.path().join("raw.db");
        let files = vec!["a.sql".to_string(), "b.sql".to_string()];

        let report = execute_sql_scripts(SqliteStore::open(&db_path)?, dir.path(), &files)?;

        assert_eq!(report.executed, vec!["b.sql"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "a.sql");

        let store = SqliteStore::open(&db_path)?;
        assert_eq!(store.row_count("b")?, 1);
        // statements before the failure stay applied
        assert!(store.table_exists("a")?);
        Ok(())
    }

    #[test]
    fn test_resolve_scripts_discovers_when_empty() -> Result<()> {
        let dir = tempdir()?;
        let sql_dir = dir.path().join("sql_scripts");
        fs::create_dir(&sql_dir)?;
        fs::write(sql_dir.join("15_knowledge.sql"), "")?;
        fs::write(sql_dir.join("03_occupation_data.sql"), "")?;

        let mut config = PipelineConfig::default();
        assert_eq!(resolve_scripts(&config, dir.path())?.len(), 9);

        config.scripts.clear();
        assert_eq!(
            resolve_scripts(&config, dir.path())?,
            vec!["03_occupation_data.sql", "15_knowledge.sql"]
        );
        Ok(())
    }
}
