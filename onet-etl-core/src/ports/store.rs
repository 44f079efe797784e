// onet-etl-core/src/ports/store.rs

// What the pipeline needs from a relational store, without knowing which
// engine is behind it. The SQLite adapter lives in infrastructure::adapters.

use crate::domain::queries::QueryResult;
use crate::domain::table::Table;
use crate::error::EtlError;

/// Column description independent of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

pub trait Store {
    /// Runs a multi-statement script. A failing statement stops the rest of the
    /// script; statements before it stay applied.
    fn execute_script(&self, sql: &str) -> Result<(), EtlError>;

    fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, EtlError>;

    /// Reads a whole table into memory.
    fn read_table(&self, table_name: &str) -> Result<Table, EtlError>;

    /// Drops `target` if it exists and recreates it from `table`.
    /// Returns the number of rows written.
    fn replace_table(&self, target: &str, table: &Table) -> Result<usize, EtlError>;

    fn query(&self, sql: &str) -> Result<QueryResult, EtlError>;

    /// Commits anything a script left open.
    fn commit(&self) -> Result<(), EtlError>;

    fn close(self) -> Result<(), EtlError>
    where
        Self: Sized;
}
