// onet-etl-core/src/infrastructure/adapters/sqlite.rs

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, OpenFlags, ToSql, params_from_iter};
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::identifier::{quote, quote_table};
use crate::domain::queries::QueryResult;
use crate::domain::table::{Column, ColumnType, Table, Value};
use crate::error::EtlError;
use crate::infrastructure::error::DatabaseError;
use crate::ports::store::{ColumnSchema, Store};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) a read-write store.
    pub fn open(db_path: &Path) -> Result<Self, EtlError> {
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    /// Opens an existing store for reporting. Writes are rejected by SQLite.
    pub fn open_read_only(db_path: &Path) -> Result<Self, EtlError> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, EtlError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn table_exists(&self, table_name: &str) -> Result<bool, EtlError> {
        let count: i64 = self.conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn row_count(&self, table_name: &str) -> Result<u64, EtlError> {
        let sql = format!("SELECT count(*) FROM {}", quote_table(table_name)?);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(r) => ValueRef::Real(*r),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b.as_slice()),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(r) => Value::Real(r),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

impl Store for SqliteStore {
    fn execute_script(&self, sql: &str) -> Result<(), EtlError> {
        // A previous script may have failed inside its own BEGIN: commit what it applied.
        self.commit()?;
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, EtlError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_table(table_name)?))?;

        let rows = stmt.query_map([], |row| {
            Ok(ColumnSchema {
                name: row.get("name")?,
                data_type: row.get("type")?,
                is_nullable: row.get::<_, i64>("notnull")? == 0,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }
        Ok(columns)
    }

    #[instrument(skip(self))]
    fn read_table(&self, table_name: &str) -> Result<Table, EtlError> {
        let schema = self.fetch_columns(table_name)?;
        if schema.is_empty() {
            return Err(DatabaseError::TableNotFound(table_name.to_string()).into());
        }

        let select = format!(
            "SELECT {} FROM {}",
            schema
                .iter()
                .map(|c| quote(&c.name))
                .collect::<Vec<_>>()
                .join(", "),
            quote_table(table_name)?
        );
        let mut stmt = self.conn.prepare(&select)?;
        let mut buffers: Vec<Vec<Value>> = vec![Vec::new(); schema.len()];

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            for (i, buffer) in buffers.iter_mut().enumerate() {
                buffer.push(value_from_ref(row.get_ref(i)?));
            }
        }

        let columns = schema
            .into_iter()
            .zip(buffers)
            .map(|(col, values)| {
                let data_type = match ColumnType::infer(&values) {
                    // Nothing to infer from: fall back on the declared type.
                    ColumnType::Null => {
                        ColumnType::from_declared(&col.data_type).unwrap_or(ColumnType::Null)
                    }
                    inferred => inferred,
                };
                Column::new(col.name, data_type, values)
            })
            .collect();

        let table = Table::try_from_columns(table_name, columns)?;
        debug!(rows = table.num_rows(), columns = table.num_columns(), "Table read");
        Ok(table)
    }

    #[instrument(skip(self, table), fields(rows = table.num_rows()))]
    fn replace_table(&self, target: &str, table: &Table) -> Result<usize, EtlError> {
        if table.num_columns() == 0 {
            return Err(DatabaseError::EmptyTable(target.to_string()).into());
        }
        let target_sql = quote_table(target)?;

        let column_defs = table
            .columns()
            .iter()
            .map(|c| match c.data_type.sql_name() {
                "" => quote(&c.name),
                ty => format!("{} {}", quote(&c.name), ty),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=table.num_columns())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.unchecked_transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {t}; CREATE TABLE {t} ({cols});",
            t = target_sql,
            cols = column_defs
        ))?;

        let mut written = 0;
        {
            let mut insert =
                tx.prepare(&format!("INSERT INTO {} VALUES ({})", target_sql, placeholders))?;
            for row in table.rows() {
                written += insert.execute(params_from_iter(row))?;
            }
        }
        tx.commit()?;

        Ok(written)
    }

    fn query(&self, sql: &str) -> Result<QueryResult, EtlError> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut result = QueryResult {
            columns,
            rows: Vec::new(),
        };
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(value_from_ref(row.get_ref(i)?));
            }
            result.rows.push(values);
        }
        Ok(result)
    }

    fn commit(&self) -> Result<(), EtlError> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(())
    }

    fn close(self) -> Result<(), EtlError> {
        self.conn.close().map_err(|(_conn, e)| EtlError::from(e))
    }
}
