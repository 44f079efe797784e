// onet-etl-core/src/domain/cleaning.rs
//
// Column-level cleaning operations. Each one consumes a table and hands back
// the cleaned table; none of them touch the database.

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::table::{Column, ColumnType, Table, Value};

/// `"  Lower_CI_Bound "` -> `"lower_ci_bound"`.
pub fn standardize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Strips, lowercases and snake-cases every column name.
pub fn standardize_column_names(mut table: Table) -> Table {
    for column in table.columns_mut() {
        column.name = standardize_name(&column.name);
    }
    table
}

/// Trims leading/trailing whitespace in every text column. Other columns pass through.
pub fn trim_whitespace(mut table: Table) -> Table {
    for column in table.columns_mut() {
        if column.data_type != ColumnType::Text {
            continue;
        }
        for value in column.values.iter_mut() {
            if let Value::Text(s) = value {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }
    table
}

/// Replaces nulls with `default` in each listed column that exists.
///
/// A listed column that does not exist is appended as an all-null column: the
/// fill value is only ever applied to values the source actually had.
pub fn fill_nulls<S: AsRef<str>>(mut table: Table, columns: &[S], default: &Value) -> Table {
    let rows = table.num_rows();
    for name in columns {
        let name = name.as_ref();
        match table.columns_mut().iter_mut().find(|c| c.name == name) {
            Some(column) => {
                let mut filled = 0usize;
                for value in column.values.iter_mut().filter(|v| v.is_null()) {
                    *value = default.clone();
                    filled += 1;
                }
                if filled > 0 {
                    let inferred = ColumnType::infer(&column.values);
                    if inferred != ColumnType::Null {
                        column.data_type = inferred;
                    }
                    debug!(column = name, filled, "Filled nulls");
                }
            }
            None => {
                debug!(column = name, "Column absent, adding it as all-null");
                table.columns_mut().push(Column::nulls(name, rows));
            }
        }
    }
    table
}

/// Renames a single column.
pub fn rename_column(mut table: Table, old_name: &str, new_name: &str) -> Result<Table, DomainError> {
    if old_name != new_name && table.has_column(new_name) {
        return Err(DomainError::DuplicateColumn {
            table: table.name().to_string(),
            column: new_name.to_string(),
        });
    }
    let table_name = table.name().to_string();
    let column = table
        .columns_mut()
        .iter_mut()
        .find(|c| c.name == old_name)
        .ok_or_else(|| DomainError::ColumnNotFound {
            table: table_name,
            column: old_name.to_string(),
        })?;
    column.name = new_name.to_string();
    Ok(table)
}

/// Standard cleaning pass: standardize names, trim text, and optionally
/// null-fill a group of columns.
///
/// The fill only happens when `null_check_columns` is non-empty and
/// `replace_null_value` is a real value (not `Value::Null`). Calling `clean`
/// several times with different groups layers several defaults on one table.
pub fn clean(
    table: Table,
    null_check_columns: Option<&[String]>,
    replace_null_value: Option<&Value>,
) -> Table {
    let table = trim_whitespace(standardize_column_names(table));

    match (null_check_columns, replace_null_value) {
        (Some(columns), Some(default)) if !columns.is_empty() && !default.is_null() => {
            fill_nulls(table, columns, default)
        }
        _ => table,
    }
}
