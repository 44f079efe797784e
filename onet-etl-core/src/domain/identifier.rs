// onet-etl-core/src/domain/identifier.rs
//
// Table names are interpolated into DDL/DML, so they are checked and quoted here.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

#[allow(clippy::expect_used)]
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    // This should never fail as the regex is hardcoded
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Quotes a column or table name for SQLite (`"a""b"`).
/// Column names coming from raw tables may contain anything, so they are quoted
/// rather than validated.
pub fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a table name that must be a plain identifier.
pub fn quote_table(name: &str) -> Result<String, DomainError> {
    if !is_valid_identifier(name) {
        return Err(DomainError::InvalidIdentifier(name.to_string()));
    }
    Ok(quote(name))
}
