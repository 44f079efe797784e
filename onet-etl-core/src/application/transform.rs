// onet-etl-core/src/application/transform.rs
//
// Raw store -> cleaned fact/dim tables in the curated store.

use std::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::application::materialization::Materializer;
use crate::domain::recipe::{Recipe, check_recipes};
use crate::domain::table::Table;
use crate::error::EtlError;
use crate::ports::store::Store;

#[derive(Debug, Clone, Copy)]
pub struct TransformOptions {
    /// Abort the run on the first read or cleaning failure.
    pub fail_fast: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { fail_fast: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    Written { rows: usize },
    WriteFailed { error: String },
    TransformFailed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    pub source: String,
    pub target: String,
    pub outcome: TableOutcome,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransformReport {
    pub tables: Vec<TableReport>,
}

impl TransformReport {
    pub fn written(&self) -> usize {
        self.tables
            .iter()
            .filter(|t| matches!(t.outcome, TableOutcome::Written { .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TableReport> {
        self.tables
            .iter()
            .filter(|t| !matches!(t.outcome, TableOutcome::Written { .. }))
    }

    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }
}

fn read_and_clean(raw: &dyn Store, recipe: &Recipe) -> Result<Table, EtlError> {
    let table = raw.read_table(&recipe.source)?;
    Ok(recipe.apply(table)?)
}

/// Loads every recipe in order.
///
/// Write failures are recorded and the next table still loads. Read and
/// cleaning failures stop the run unless `fail_fast` is off.
#[instrument(skip_all, fields(tables = recipes.len(), fail_fast = options.fail_fast))]
pub fn run_transform(
    raw: &dyn Store,
    curated: &dyn Store,
    recipes: &[Recipe],
    options: TransformOptions,
) -> Result<TransformReport, EtlError> {
    check_recipes(recipes)?;

    let start = Instant::now();
    let mut report = TransformReport::default();

    for recipe in recipes {
        info!(source = %recipe.source, target = %recipe.target, "Transforming table");

        let outcome = match read_and_clean(raw, recipe) {
            Err(e) if options.fail_fast => {
                error!(source = %recipe.source, "Transform aborted: {}", e);
                return Err(e);
            }
            Err(e) => {
                warn!(source = %recipe.source, "Skipping table: {}", e);
                TableOutcome::TransformFailed {
                    error: e.to_string(),
                }
            }
            Ok(table) => match Materializer::replace_table(curated, &recipe.target, &table) {
                Ok(rows) => TableOutcome::Written { rows },
                Err(e) => TableOutcome::WriteFailed {
                    error: e.to_string(),
                },
            },
        };

        report.tables.push(TableReport {
            source: recipe.source.clone(),
            target: recipe.target.clone(),
            outcome,
        });
    }

    info!(
        written = report.written(),
        failed = report.tables.len() - report.written(),
        "Transform finished in {:.2?}",
        start.elapsed()
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use crate::domain::recipe::{FillValue, default_recipes};
    use crate::domain::table::Value;
    use crate::infrastructure::adapters::SqliteStore;
    use anyhow::Result;

    fn raw_store() -> Result<SqliteStore> {
        let raw = SqliteStore::open_in_memory()?;
        raw.execute_script(
            r#"CREATE TABLE abilities (
                   "O*NET-SOC Code" TEXT,
                   "Element Name" TEXT,
                   "Data Value" REAL,
                   "Lower_CI_Bound " REAL
               );
               INSERT INTO abilities VALUES ('11-1011.00', ' Oral Comprehension ', 4.5, NULL);
               INSERT INTO abilities VALUES ('11-1011.00', 'Written Expression', 4.2, 3.9);
               CREATE TABLE job_zones (onetsoc_code TEXT, job_zone INTEGER);
               INSERT INTO job_zones VALUES ('11-1011.00', 5);"#,
        )?;
        Ok(raw)
    }

    fn abilities_recipe() -> Recipe {
        Recipe::new("abilities", "fact_abilities").fill(&["lower_ci_bound"], FillValue::Integer(0))
    }

    #[test]
    fn test_abilities_column_is_standardized_and_filled() -> Result<()> {
        let raw = raw_store()?;
        let curated = SqliteStore::open_in_memory()?;

        let report = run_transform(
            &raw,
            &curated,
            &[abilities_recipe()],
            TransformOptions::default(),
        )?;
        assert_eq!(report.tables[0].outcome, TableOutcome::Written { rows: 2 });

        let fact = curated.read_table("fact_abilities")?;
        assert_eq!(
            fact.column_names(),
            vec!["o*net-soc_code", "element_name", "data_value", "lower_ci_bound"]
        );
        assert_eq!(
            fact.column("lower_ci_bound").unwrap().values,
            vec![Value::Real(0.0), Value::Real(3.9)]
        );
        assert_eq!(
            fact.column("element_name").unwrap().values[0],
            Value::from("Oral Comprehension")
        );
        Ok(())
    }

    #[test]
    fn test_transform_twice_is_identical() -> Result<()> {
        let raw = raw_store()?;
        let curated = SqliteStore::open_in_memory()?;
        let recipes = vec![
            abilities_recipe(),
            Recipe::new("job_zones", "fact_job_zones"),
        ];

        run_transform(&raw, &curated, &recipes, TransformOptions::default())?;
        let first = (
            curated.read_table("fact_abilities")?,
            curated.read_table("fact_job_zones")?,
        );
        run_transform(&raw, &curated, &recipes, TransformOptions::default())?;
        let second = (
            curated.read_table("fact_abilities")?,
            curated.read_table("fact_job_zones")?,
        );

        assert_eq!(first, second);
        assert_eq!(curated.row_count("fact_job_zones")?, 1);
        Ok(())
    }

    #[test]
    fn test_missing_rename_source_halts_by_default() -> Result<()> {
        let raw = raw_store()?;
        let curated = SqliteStore::open_in_memory()?;
        let recipes = vec![
            Recipe::new("job_zones", "fact_job_zones").rename("n", "sample_size"),
            abilities_recipe(),
        ];

        let err = run_transform(&raw, &curated, &recipes, TransformOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EtlError::Domain(DomainError::ColumnNotFound { .. })
        ));
        // nothing after the failing table was written
        assert!(!curated.table_exists("fact_abilities")?);
        Ok(())
    }

    #[test]
    fn test_keep_going_records_failures() -> Result<()> {
        let raw = raw_store()?;
        let curated = SqliteStore::open_in_memory()?;
        let recipes = vec![
            Recipe::new("job_zones", "fact_job_zones").rename("n", "sample_size"),
            Recipe::new("skills", "fact_skills"),
            abilities_recipe(),
        ];

        let report = run_transform(
            &raw,
            &curated,
            &recipes,
            TransformOptions { fail_fast: false },
        )?;

        assert_eq!(report.written(), 1);
        assert!(!report.success());
        let failed: Vec<&str> = report.failures().map(|t| t.source.as_str()).collect();
        assert_eq!(failed, vec!["job_zones", "skills"]);
        assert!(matches!(
            report.tables[1].outcome,
            TableOutcome::TransformFailed { .. }
        ));
        assert!(curated.table_exists("fact_abilities")?);
        Ok(())
    }

    #[test]
    fn test_write_failure_is_recorded_and_run_continues() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("curated.db");
        SqliteStore::open(&path)?.close()?;

        let raw = raw_store()?;
        let curated = SqliteStore::open_read_only(&path)?;
        let recipes = vec![
            abilities_recipe(),
            Recipe::new("job_zones", "fact_job_zones"),
        ];

        let report = run_transform(&raw, &curated, &recipes, TransformOptions::default())?;
        assert_eq!(report.tables.len(), 2);
        assert!(
            report
                .tables
                .iter()
                .all(|t| matches!(t.outcome, TableOutcome::WriteFailed { .. }))
        );
        Ok(())
    }

    #[test]
    fn test_invalid_recipe_set_writes_nothing() -> Result<()> {
        let raw = raw_store()?;
        let curated = SqliteStore::open_in_memory()?;
        let recipes = vec![
            abilities_recipe(),
            Recipe::new("job_zones", "fact_abilities"),
        ];

        assert!(run_transform(&raw, &curated, &recipes, TransformOptions::default()).is_err());
        assert!(!curated.table_exists("fact_abilities")?);
        Ok(())
    }

    #[test]
    fn test_default_recipes_on_empty_raw_store() -> Result<()> {
        let raw = SqliteStore::open_in_memory()?;
        let curated = SqliteStore::open_in_memory()?;
        let report = run_transform(
            &raw,
            &curated,
            &default_recipes(),
            TransformOptions { fail_fast: false },
        )?;
        assert_eq!(report.tables.len(), 9);
        assert_eq!(report.written(), 0);
        Ok(())
    }
}
