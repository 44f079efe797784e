// onet-etl-core/src/domain/recipe.rs
//
// Declarative per-table transform configuration: which raw table to read,
// which columns to rename, which null-fill groups to apply, where to write.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::cleaning::{clean, rename_column};
use crate::domain::error::DomainError;
use crate::domain::identifier::is_valid_identifier;
use crate::domain::table::{Table, Value};

/// A null-fill default as written in configuration (`0`, `100`, `"Undefined"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<&FillValue> for Value {
    fn from(v: &FillValue) -> Self {
        match v {
            FillValue::Integer(i) => Value::Integer(*i),
            FillValue::Real(r) => Value::Real(*r),
            FillValue::Text(s) => Value::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Rename {
    #[validate(length(min = 1, message = "Rename source cannot be empty"))]
    pub from: String,
    #[validate(length(min = 1, message = "Rename target cannot be empty"))]
    pub to: String,
}

/// One `clean` pass: a group of columns sharing a default value.
/// A pass with no columns (or no default) only standardizes names and trims text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CleanPass {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub default: Option<FillValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Recipe {
    /// Raw table name.
    #[validate(custom(function = "validate_identifier"))]
    pub source: String,

    /// Curated fact/dimension table name.
    #[validate(custom(function = "validate_identifier"))]
    pub target: String,

    #[validate(nested)]
    #[serde(default)]
    pub renames: Vec<Rename>,

    #[serde(default)]
    pub passes: Vec<CleanPass>,
}

impl Recipe {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            renames: Vec::new(),
            passes: Vec::new(),
        }
    }

    pub fn rename(mut self, from: &str, to: &str) -> Self {
        self.renames.push(Rename {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn fill(mut self, columns: &[&str], default: FillValue) -> Self {
        self.passes.push(CleanPass {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            default: Some(default),
        });
        self
    }

    /// A pass that standardizes and trims without filling anything.
    pub fn tidy(mut self) -> Self {
        self.passes.push(CleanPass::default());
        self
    }

    /// Renames first (against the raw column names), then every clean pass in order.
    pub fn apply(&self, table: Table) -> Result<Table, DomainError> {
        let mut table = table;
        for r in &self.renames {
            table = rename_column(table, &r.from, &r.to)?;
        }
        for pass in &self.passes {
            let default = pass.default.as_ref().map(Value::from);
            table = clean(table, Some(&pass.columns), default.as_ref());
        }
        Ok(table)
    }
}

fn validate_identifier(name: &str) -> Result<(), ValidationError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(ValidationError::new("identifier"))
    }
}

/// Every target must be written exactly once per run.
pub fn validate_unique_targets(recipes: &[Recipe]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for recipe in recipes {
        if !seen.insert(recipe.target.as_str()) {
            let mut err = ValidationError::new("duplicate_target");
            err.message = Some(format!("target '{}' is written twice", recipe.target).into());
            return Err(err);
        }
    }
    Ok(())
}

/// Checks a recipe set before anything is written.
pub fn check_recipes(recipes: &[Recipe]) -> Result<(), DomainError> {
    for recipe in recipes {
        recipe.validate().map_err(|e| {
            DomainError::InvalidRecipe(format!("{} -> {}: {}", recipe.source, recipe.target, e))
        })?;
    }
    validate_unique_targets(recipes).map_err(|e| {
        DomainError::InvalidRecipe(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string()),
        )
    })
}

/// The O*NET load: eight fact/dimension tables in a fixed order.
pub fn default_recipes() -> Vec<Recipe> {
    let zero = || FillValue::Integer(0);
    let hundred = || FillValue::Integer(100);
    let undefined = || FillValue::Text("Undefined".to_string());

    vec![
        Recipe::new("abilities", "fact_abilities")
            .fill(&["standard_error", "lower_ci_bound"], zero())
            .fill(&["upper_ci_bound"], hundred())
            .fill(&["not_relevant"], undefined()),
        Recipe::new(
            "education_training_experience",
            "fact_education_training_experience",
        )
        .rename("n", "sample_size")
        .fill(
            &[
                "category",
                "data_value",
                "sample_size",
                "standard_error",
                "lower_ci_bound",
            ],
            zero(),
        )
        .fill(&["upper_ci_bound"], hundred())
        .fill(&["recommend_suppress"], undefined()),
        Recipe::new("job_zone_reference", "dim_job_zone_reference").fill(&["name"], undefined()),
        Recipe::new("occupation_data", "dim_occupation_data"),
        Recipe::new("occupation_level_metadata", "dim_occupation_level_metadata")
            .rename("n", "sample_size")
            .fill(&["response"], FillValue::Text("No response".to_string()))
            .fill(&["sample_size", "percent"], zero()),
        Recipe::new("job_zones", "fact_job_zones"),
        Recipe::new("knowledge", "fact_knowledge")
            .rename("n", "sample_size")
            .fill(
                &["data_value", "sample_size", "standard_error", "lower_ci_bound"],
                zero(),
            )
            .fill(&["upper_ci_bound"], hundred())
            .fill(&["recommend_suppress", "not_relevant"], undefined()),
        Recipe::new("skills", "fact_skills")
            .rename("n", "sample_size")
            .fill(
                &["data_value", "sample_size", "standard_error", "lower_ci_bound"],
                zero(),
            )
            .fill(&["upper_ci_bound"], hundred())
            .fill(&["recommend_suppress", "not_relevant"], undefined()),
        Recipe::new("level_scale_anchors", "dim_level_scale_anchors").tidy(),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::Column;

    #[test]
    fn test_default_recipes_are_valid() {
        let recipes = default_recipes();
        assert_eq!(recipes.len(), 9);
        assert!(check_recipes(&recipes).is_ok());
        assert!(recipes.iter().all(|r| r.target.starts_with("fact_") || r.target.starts_with("dim_")));
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let recipes = vec![
            Recipe::new("a", "fact_a"),
            Recipe::new("b", "fact_a"),
        ];
        let err = check_recipes(&recipes).unwrap_err();
        assert!(err.to_string().contains("fact_a"));
    }

    #[test]
    fn test_invalid_identifier_rejected() {
        let recipes = vec![Recipe::new("abilities", "fact abilities; DROP")];
        assert!(matches!(
            check_recipes(&recipes),
            Err(DomainError::InvalidRecipe(_))
        ));
    }

    #[test]
    fn test_recipe_applies_rename_then_layers() -> anyhow::Result<()> {
        let raw = Table::new("knowledge")
            .with_column(Column::inferred("n", vec![Value::Null, Value::Integer(15)]))?
            .with_column(Column::inferred(
                "upper_ci_bound",
                vec![Value::Real(4.1), Value::Null],
            ))?
            .with_column(Column::inferred(
                "recommend_suppress",
                vec![Value::from("N "), Value::Null],
            ))?;

        let recipe = default_recipes()
            .into_iter()
            .find(|r| r.source == "knowledge")
            .unwrap();
        let out = recipe.apply(raw)?;

        assert_eq!(
            out.column("sample_size").unwrap().values,
            vec![Value::Integer(0), Value::Integer(15)]
        );
        assert_eq!(
            out.column("upper_ci_bound").unwrap().values,
            vec![Value::Real(4.1), Value::Integer(100)]
        );
        assert_eq!(
            out.column("recommend_suppress").unwrap().values,
            vec![Value::from("N"), Value::from("Undefined")]
        );
        // listed but absent in the raw table: added as nulls
        assert_eq!(out.column("not_relevant").unwrap().null_count(), 2);
        assert_eq!(out.column("data_value").unwrap().null_count(), 2);
        Ok(())
    }

    #[test]
    fn test_recipe_missing_rename_source_halts() -> anyhow::Result<()> {
        let raw = Table::new("skills").with_column(Column::inferred("N", vec![Value::Integer(1)]))?;
        let recipe = default_recipes()
            .into_iter()
            .find(|r| r.source == "skills")
            .unwrap();
        assert!(matches!(
            recipe.apply(raw),
            Err(DomainError::ColumnNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_recipes_deserialize_from_yaml() -> anyhow::Result<()> {
        let yaml = r#"
- source: skills
  target: fact_skills
  renames:
    - { from: n, to: sample_size }
  passes:
    - columns: [data_value, sample_size]
      default: 0
    - columns: [upper_ci_bound]
      default: 99.5
    - columns: [not_relevant]
      default: Undefined
- source: occupation_data
  target: dim_occupation_data
"#;
        let recipes: Vec<Recipe> = serde_yaml::from_str(yaml)?;
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].passes[0].default, Some(FillValue::Integer(0)));
        assert_eq!(recipes[0].passes[1].default, Some(FillValue::Real(99.5)));
        assert_eq!(
            recipes[0].passes[2].default,
            Some(FillValue::Text("Undefined".into()))
        );
        assert!(recipes[1].passes.is_empty());
        Ok(())
    }
}
