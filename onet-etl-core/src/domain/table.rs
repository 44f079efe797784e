// onet-etl-core/src/domain/table.rs

use std::fmt;

use crate::domain::error::DomainError;

/// A single cell. Mirrors the SQLite storage classes; `Null` is the absence marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{}", i),
            // 0.0 stays 0.0 so float columns read as floats
            Value::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{:.1}", r),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
            Value::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Logical type of a column. `Null` means no value has told us anything yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Null,
}

impl ColumnType {
    /// Maps a declared SQL type through SQLite's affinity rules.
    /// Returns `None` for an empty declaration (no affinity).
    pub fn from_declared(declared: &str) -> Option<Self> {
        let decl = declared.trim().to_uppercase();
        if decl.is_empty() {
            return None;
        }
        let ty = if decl.contains("INT") {
            Self::Integer
        } else if decl.contains("CHAR") || decl.contains("CLOB") || decl.contains("TEXT") {
            Self::Text
        } else if decl.contains("BLOB") {
            Self::Blob
        } else {
            // REAL, FLOAT, DOUBLE and the NUMERIC family (DECIMAL, DATE...)
            Self::Real
        };
        Some(ty)
    }

    /// Infers the type from the values actually held, the way a dataframe
    /// library infers a dtype from fetched rows. Integers widen to reals;
    /// any text wins over numbers.
    pub fn infer(values: &[Value]) -> Self {
        let mut inferred = Self::Null;
        for value in values {
            let ty = match value {
                Value::Null => continue,
                Value::Integer(_) => Self::Integer,
                Value::Real(_) => Self::Real,
                Value::Text(_) => Self::Text,
                Value::Blob(_) => Self::Blob,
            };
            inferred = match (inferred, ty) {
                (Self::Null, t) => t,
                (Self::Integer, Self::Real) | (Self::Real, Self::Integer) => Self::Real,
                (current, t) if current == t => current,
                (Self::Blob, _) | (_, Self::Blob) => Self::Blob,
                _ => Self::Text,
            };
        }
        inferred
    }

    /// Column type used in generated DDL. `Null` columns get no declared type.
    pub fn sql_name(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Null => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: ColumnType,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: ColumnType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    /// Builds a column whose type is inferred from its values.
    pub fn inferred(name: impl Into<String>, values: Vec<Value>) -> Self {
        let data_type = ColumnType::infer(&values);
        Self::new(name, data_type, values)
    }

    /// An all-null column of the given length.
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, ColumnType::Null, vec![Value::Null; len])
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }
}

/// A named, in-memory columnar dataset. Every column holds the same number of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn try_from_columns(
        name: impl Into<String>,
        columns: Vec<Column>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            if let Some(bad) = columns.iter().find(|c| c.values.len() != expected) {
                return Err(DomainError::RaggedTable {
                    table: name,
                    column: bad.name.clone(),
                    expected,
                    found: bad.values.len(),
                });
            }
        }
        Ok(Self { name, columns })
    }

    /// Appends a column, rejecting it if its length disagrees with the table.
    pub fn with_column(self, column: Column) -> Result<Self, DomainError> {
        let Self { name, mut columns } = self;
        columns.push(column);
        Self::try_from_columns(name, columns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Row-major view, used when writing the table out.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.num_rows()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}
