pub mod store;

pub use store::{ColumnSchema, Store};
