// onet-etl-core/src/application/report.rs
//
// Console rendering shared by the insights and validation runners.

use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{Cell, ContentArrangement, Table as PrettyTable};

use crate::domain::queries::QueryResult;

/// Renders query rows as a bordered table followed by a `shape: (rows, cols)` footer.
pub fn render_result(result: &QueryResult) -> String {
    let mut table = PrettyTable::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(result.columns.iter().map(Cell::new));

    for row in &result.rows {
        table.add_row(row.iter().map(|v| Cell::new(v.to_string())));
    }

    format!(
        "{}\nshape: ({}, {})",
        table,
        result.rows.len(),
        result.columns.len()
    )
}

/// `====` ruled heading used by the insights report.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(80);
    format!("\n{rule}\n{title}\n{rule}")
}
