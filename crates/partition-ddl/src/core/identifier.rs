//! Identifier validation and escaping for MySQL-family DDL.
//!
//! Partition names are escaped only on servers that quote them in
//! `SHOW CREATE TABLE`, and comment values are escaped the same way the
//! server escapes table-level `COMMENT` values. Callers decide *when* to
//! escape; this module only knows *how*.

use crate::error::{PartitionError, Result};

/// Maximum identifier length in MySQL and MariaDB.
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate an identifier.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes
/// - Identifiers exceeding 64 characters
///
/// # Errors
///
/// Returns `PartitionError::Validation` with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PartitionError::Validation(
            "Identifier cannot be empty".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(PartitionError::Validation(format!(
            "Identifier contains null byte: {:?}",
            name
        )));
    }

    let length = name.chars().count();
    if length > MAX_IDENTIFIER_LENGTH {
        return Err(PartitionError::Validation(format!(
            "Identifier exceeds maximum length of {} characters (got {}): {:?}",
            MAX_IDENTIFIER_LENGTH, length, name
        )));
    }

    Ok(())
}

/// Quote an identifier using backticks, doubling any embedded backticks.
///
/// # Examples
///
/// ```
/// use partition_ddl::core::identifier::escape_identifier;
///
/// assert_eq!(escape_identifier("p0"), "`p0`");
/// assert_eq!(escape_identifier("p`0"), "`p``0`");
/// ```
pub fn escape_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Escape a string value for use inside single quotes in a `CREATE TABLE`
/// statement, matching how the server prints `COMMENT` values.
///
/// Backslashes, null bytes, newlines and carriage returns become backslash
/// sequences; single quotes are doubled.
pub fn escape_value_for_create_table(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\0' => escaped.push_str("\\0"),
            '\'' => escaped.push_str("''"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
