// onet-etl/src/commands/inspect.rs
//
// USE CASE: Inspect a table (schema + sample rows).

use std::path::Path;

use onet_etl_core::application::execute_query;
use onet_etl_core::application::report::render_result;
use onet_etl_core::domain::identifier::quote_table;
use onet_etl_core::domain::project::PipelineConfig;
use onet_etl_core::ports::Store;

use super::open_existing;
use crate::cli::StoreKind;

pub fn execute(
    project_dir: &Path,
    config: &PipelineConfig,
    table: &str,
    db: StoreKind,
    limit: usize,
) -> anyhow::Result<()> {
    let store = match db {
        StoreKind::Raw => open_existing(&config.raw_db_path(project_dir), "extract")?,
        StoreKind::Curated => open_existing(&config.curated_db_path(project_dir), "transform")?,
    };

    println!("\n🔍 Inspecting Table: '{}'", table);

    let columns = store.fetch_columns(table)?;
    if columns.is_empty() {
        anyhow::bail!("❌ Table '{}' not found in the {:?} store", table, db);
    }
    let described: Vec<String> = columns
        .iter()
        .map(|c| {
            let not_null = if c.is_nullable { "" } else { " NOT NULL" };
            format!("{} {}{}", c.name, c.data_type, not_null)
        })
        .collect();
    println!("   Columns: [{}]", described.join(", "));
    println!("   --- Rows (Limit {}) ---", limit);

    let sql = format!("SELECT * FROM {} LIMIT {}", quote_table(table)?, limit);
    let rows = execute_query(&store, &sql)?;
    println!("{}", render_result(&rows));

    Ok(())
}
