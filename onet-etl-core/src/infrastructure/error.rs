// onet-etl-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("SQLite Engine Error: {0}")]
    #[diagnostic(
        code(onet::infra::database::sqlite),
        help("An error occurred inside the SQL engine.")
    )]
    Sqlite(#[from] rusqlite::Error),

    #[error("Table '{0}' not found")]
    #[diagnostic(
        code(onet::infra::database::table_not_found),
        help("Has the extract stage been run against this store?")
    )]
    TableNotFound(String),

    #[error("Cannot write table '{0}' without columns")]
    #[diagnostic(code(onet::infra::database::empty_table))]
    EmptyTable(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(onet::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("Could not read SQL script {path:?}: {source}")]
    #[diagnostic(code(onet::infra::script_read))]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not scan SQL directory: {0}")]
    #[diagnostic(code(onet::infra::script_scan))]
    ScriptScan(#[from] walkdir::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(onet::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(onet::infra::config))]
    ConfigError(String),
}

// Shortcut for `?` on rusqlite calls
impl From<rusqlite::Error> for InfrastructureError {
    fn from(err: rusqlite::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Sqlite(err))
    }
}
