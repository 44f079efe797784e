use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Reads a whole SQL script as UTF-8.
pub fn read_sql_script(sql_dir: &Path, file_name: &str) -> Result<String, InfrastructureError> {
    let path = sql_dir.join(file_name);
    debug!(path = ?path, "Opening SQL script");
    fs::read_to_string(&path).map_err(|source| InfrastructureError::ScriptRead { path, source })
}

/// Lists the `.sql` files directly under `sql_dir`, sorted by file name so
/// numbered scripts (`02_...`, `11_...`) run in their intended order.
pub fn discover_sql_scripts(sql_dir: &Path) -> Result<Vec<String>, InfrastructureError> {
    let mut scripts = Vec::new();
    for entry in WalkDir::new(sql_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("sql") {
            scripts.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_read_sql_script() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("02_job_zone_reference.sql"), "SELECT 1;")?;

        assert_eq!(read_sql_script(dir.path(), "02_job_zone_reference.sql")?, "SELECT 1;");
        let err = read_sql_script(dir.path(), "missing.sql").unwrap_err();
        assert!(matches!(err, InfrastructureError::ScriptRead { .. }));
        Ok(())
    }

    #[test]
    fn test_discover_sorts_and_filters() -> Result<()> {
        let dir = tempdir()?;
        for name in ["11_abilities.sql", "02_job_zone_reference.sql", "README.md"] {
            fs::write(dir.path().join(name), "")?;
        }
        fs::create_dir(dir.path().join("nested.sql"))?;

        let scripts = discover_sql_scripts(dir.path())?;
        assert_eq!(scripts, vec!["02_job_zone_reference.sql", "11_abilities.sql"]);
        Ok(())
    }
}
