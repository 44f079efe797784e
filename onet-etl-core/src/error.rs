// onet-etl-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum EtlError {
    // --- DOMAIN (cleaning, recipes) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (SQLite, IO, config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

impl From<std::io::Error> for EtlError {
    fn from(err: std::io::Error) -> Self {
        EtlError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<rusqlite::Error> for EtlError {
    fn from(err: rusqlite::Error) -> Self {
        EtlError::Infrastructure(InfrastructureError::Database(DatabaseError::Sqlite(err)))
    }
}

impl From<DatabaseError> for EtlError {
    fn from(err: DatabaseError) -> Self {
        EtlError::Infrastructure(InfrastructureError::Database(err))
    }
}
