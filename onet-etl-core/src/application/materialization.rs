// onet-etl-core/src/application/materialization.rs

use std::time::Instant;
use tracing::{error, info};

use crate::domain::table::Table;
use crate::error::EtlError;
use crate::ports::store::Store;

pub struct Materializer;

impl Materializer {
    /// Writes a cleaned table to the curated store, replacing any table of the
    /// same name. Full refresh only: there is no append or merge strategy.
    pub fn replace_table(store: &dyn Store, target: &str, table: &Table) -> Result<usize, EtlError> {
        let start = Instant::now();
        match store.replace_table(target, table) {
            Ok(rows) => {
                info!(
                    target,
                    rows,
                    columns = table.num_columns(),
                    "Write successful for table in {:.2?}",
                    start.elapsed()
                );
                Ok(rows)
            }
            Err(e) => {
                error!(target, "Error writing table: {}", e);
                Err(e)
            }
        }
    }
}
