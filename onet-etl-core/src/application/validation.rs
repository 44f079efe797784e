// onet-etl-core/src/application/validation.rs

use std::io::Write;
use tracing::{error, info, warn};

use crate::application::engine::execute_query;
use crate::application::report::render_result;
use crate::domain::queries::{NamedQuery, QueryResult};
use crate::error::EtlError;
use crate::ports::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// The check returned no rows.
    Passed,
    /// Offending rows.
    Issues(QueryResult),
    /// The query itself could not run (e.g. a curated table is missing).
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub title: String,
    pub status: CheckStatus,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationReport {
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Passed))
    }

    pub fn with_issues(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Issues(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Failed(_)))
    }

    /// True when any check found rows or could not run.
    pub fn has_issues(&self) -> bool {
        self.passed() != self.checks.len()
    }

    fn count(&self, pred: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.status)).count()
    }

    pub fn summary(&self) -> String {
        let header = format!(
            "{} checks: {} passed, {} with issues, {} failed",
            self.checks.len(),
            self.passed(),
            self.with_issues(),
            self.failed()
        );
        let lines = self.checks.iter().map(|check| match &check.status {
            CheckStatus::Passed => format!("  ✅ {}", check.title),
            CheckStatus::Issues(rows) => format!("  ⚠️ {} ({} rows)", check.title, rows.len()),
            CheckStatus::Failed(e) => format!("  ❌ {}: {}", check.title, e),
        });
        std::iter::once(header)
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs each data-quality check and prints its heading followed by either
/// `✅ No issues found` or the offending rows.
pub fn run_checks(
    store: &dyn Store,
    checks: &[NamedQuery],
    out: &mut dyn Write,
) -> Result<ValidationReport, EtlError> {
    let mut report = ValidationReport::default();

    for check in checks {
        writeln!(out, "\n=== {} ===", check.title)?;
        let status = match execute_query(store, check.sql) {
            Ok(rows) if rows.is_empty() => {
                writeln!(out, "✅ No issues found")?;
                CheckStatus::Passed
            }
            Ok(rows) => {
                warn!(check = check.title, rows = rows.len(), "Validation check found issues");
                writeln!(out, "{}", render_result(&rows))?;
                CheckStatus::Issues(rows)
            }
            Err(e) => {
                error!(check = check.title, "Error running validation check: {}", e);
                writeln!(out, "❌ Check failed: {}", e)?;
                CheckStatus::Failed(e.to_string())
            }
        };
        report.checks.push(CheckResult {
            title: check.title.to_string(),
            status,
        });
    }

    info!(
        passed = report.passed(),
        issues = report.with_issues(),
        failed = report.failed(),
        "Validation finished"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::queries::VALIDATION_CHECKS;
    use crate::domain::table::Value;
    use crate::infrastructure::adapters::SqliteStore;
    use anyhow::Result;

    fn job_zone_check() -> NamedQuery {
        *VALIDATION_CHECKS
            .iter()
            .find(|c| c.title == "Invalid job_zone values")
            .unwrap()
    }

    fn zones_store(values: &str) -> Result<SqliteStore> {
        let store = SqliteStore::open_in_memory()?;
        store.execute_script(&format!(
            "CREATE TABLE fact_job_zones (onetsoc_code TEXT, job_zone INTEGER);
             INSERT INTO fact_job_zones VALUES {values};"
        ))?;
        Ok(store)
    }

    #[test]
    fn test_invalid_job_zone_is_reported() -> Result<()> {
        let store = zones_store("('11-1011.00', 5), ('11-1011.03', 7)")?;
        let mut out = Vec::new();
        let report = run_checks(&store, &[job_zone_check()], &mut out)?;

        match &report.checks[0].status {
            CheckStatus::Issues(rows) => {
                assert_eq!(rows.len(), 1);
                assert!(rows.rows[0].contains(&Value::Integer(7)));
            }
            other => panic!("expected issues, got {:?}", other),
        }
        assert!(report.has_issues());
        assert!(String::from_utf8(out)?.contains("11-1011.03"));
        Ok(())
    }

    #[test]
    fn test_valid_job_zones_print_no_issues() -> Result<()> {
        let store = zones_store("('a', 1), ('b', 2), ('c', 3), ('d', 4), ('e', 5)")?;
        let mut out = Vec::new();
        let report = run_checks(&store, &[job_zone_check()], &mut out)?;

        assert_eq!(report.checks[0].status, CheckStatus::Passed);
        assert!(!report.has_issues());
        assert_eq!(
            String::from_utf8(out)?,
            "\n=== Invalid job_zone values ===\n✅ No issues found\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_tables_are_reported_per_check() -> Result<()> {
        let store = SqliteStore::open_in_memory()?;
        let mut out = Vec::new();
        let report = run_checks(&store, VALIDATION_CHECKS, &mut out)?;

        assert_eq!(report.checks.len(), 7);
        assert_eq!(report.failed(), 7);
        let printed = String::from_utf8(out)?;
        assert_eq!(printed.matches("❌ Check failed").count(), 7);
        Ok(())
    }

    #[test]
    fn test_summary_snapshot() {
        let report = ValidationReport {
            checks: vec![
                CheckResult {
                    title: "Invalid job_zone values".into(),
                    status: CheckStatus::Passed,
                },
                CheckResult {
                    title: "Duplicate rows in fact_skills".into(),
                    status: CheckStatus::Issues(QueryResult {
                        columns: vec!["onetsoc_code".into()],
                        rows: vec![vec![Value::from("11-1011.00")], vec![Value::from("15-1252.00")]],
                    }),
                },
                CheckResult {
                    title: "Occupations with no skills".into(),
                    status: CheckStatus::Failed("no such table: fact_skills".into()),
                },
            ],
        };

        assert_eq!(
            ValidationReport::default().summary(),
            "0 checks: 0 passed, 0 with issues, 0 failed"
        );
        insta::assert_snapshot!(report.summary(), @r"
3 checks: 1 passed, 1 with issues, 1 failed
  ✅ Invalid job_zone values
  ⚠️ Duplicate rows in fact_skills (2 rows)
  ❌ Occupations with no skills: no such table: fact_skills
");
    }
}
