// onet-etl-core/src/application/insights.rs

use std::io::Write;
use tracing::{error, info};

use crate::application::engine::execute_query;
use crate::application::report::{banner, render_result};
use crate::domain::queries::{NamedQuery, QueryResult};
use crate::error::EtlError;
use crate::ports::store::Store;

#[derive(Debug, Clone, PartialEq)]
pub struct InsightOutcome {
    pub title: String,
    pub result: Result<QueryResult, String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct InsightsReport {
    pub queries: Vec<InsightOutcome>,
}

impl InsightsReport {
    pub fn failed(&self) -> usize {
        self.queries.iter().filter(|q| q.result.is_err()).count()
    }
}

/// Runs each analytical query and prints its heading and rows to `out`.
/// A failing query is reported under its heading; the next one still runs.
pub fn run_insights(
    store: &dyn Store,
    queries: &[NamedQuery],
    out: &mut dyn Write,
) -> Result<InsightsReport, EtlError> {
    let mut report = InsightsReport::default();

    for query in queries {
        writeln!(out, "{}", banner(query.title))?;
        let result = match execute_query(store, query.sql) {
            Ok(rows) => {
                writeln!(out, "{}", render_result(&rows))?;
                Ok(rows)
            }
            Err(e) => {
                error!(query = query.title, "Error running insight query: {}", e);
                writeln!(out, "❌ Query failed: {}", e)?;
                Err(e.to_string())
            }
        };
        report.queries.push(InsightOutcome {
            title: query.title.to_string(),
            result,
        });
    }

    info!(
        queries = report.queries.len(),
        failed = report.failed(),
        "Insights finished"
    );
    Ok(report)
}
