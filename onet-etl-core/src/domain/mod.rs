pub mod cleaning;
pub mod error;
pub mod identifier;
pub mod project;
pub mod queries;
pub mod recipe;
pub mod table;

// Re-exports: raccourcis pour les couches application et infra
pub use error::DomainError;
pub use recipe::Recipe;
pub use table::{Column, ColumnType, Table, Value};
