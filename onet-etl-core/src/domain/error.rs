// onet-etl-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Column '{column}' does not exist in table '{table}'")]
    #[diagnostic(
        code(onet::domain::column_not_found),
        help("Check the raw schema: renames are applied before column names are standardized.")
    )]
    ColumnNotFound { table: String, column: String },

    #[error("Column '{column}' already exists in table '{table}'")]
    #[diagnostic(code(onet::domain::duplicate_column))]
    DuplicateColumn { table: String, column: String },

    #[error(
        "Column '{column}' of table '{table}' has {found} rows, expected {expected}"
    )]
    #[diagnostic(code(onet::domain::ragged_table))]
    RaggedTable {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid recipe: {0}")]
    #[diagnostic(
        code(onet::domain::recipe),
        help("Every recipe needs a source, a unique target and plain SQL identifiers.")
    )]
    InvalidRecipe(String),

    #[error("'{0}' is not a valid SQL identifier")]
    #[diagnostic(code(onet::domain::identifier))]
    InvalidIdentifier(String),
}
