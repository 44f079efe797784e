// onet-etl-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::domain::queries::QueryResult;
use crate::error::EtlError;
use crate::ports::store::Store;

/// Runs a read-only query with instrumentation (logs + timing).
#[instrument(skip(store, query), fields(query.len = query.len()))]
pub fn execute_query(store: &dyn Store, query: &str) -> Result<QueryResult, EtlError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query.trim());

    let result = store.query(query);
    let duration = start.elapsed();

    match result {
        Ok(rows) => {
            debug!(rows = rows.len(), "✅ Query finished in {:.2?}", duration);
            Ok(rows)
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
