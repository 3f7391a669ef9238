//! Classification of errors returned by a MySQL-family server.
//!
//! The connection and execution layers use these predicates to decide whether
//! a failed query or connection attempt is worth retrying. Nothing in the
//! partitioning core depends on them.

use std::error::Error as StdError;

use thiserror::Error;

/// `ER_PARSE_ERROR`
pub const ER_PARSE_ERROR: u16 = 1064;
/// `ER_SYNTAX_ERROR`
pub const ER_SYNTAX_ERROR: u16 = 1149;

/// `ER_ACCESS_DENIED_ERROR`
pub const ER_ACCESS_DENIED_ERROR: u16 = 1045;
/// `ER_BAD_HOST_ERROR`
pub const ER_BAD_HOST_ERROR: u16 = 1042;
/// `ER_DBACCESS_DENIED_ERROR`
pub const ER_DBACCESS_DENIED_ERROR: u16 = 1044;
/// `ER_BAD_DB_ERROR`
pub const ER_BAD_DB_ERROR: u16 = 1049;
/// `ER_HOST_NOT_PRIVILEGED`
pub const ER_HOST_NOT_PRIVILEGED: u16 = 1130;
/// `ER_HOST_IS_BLOCKED`
pub const ER_HOST_IS_BLOCKED: u16 = 1129;
/// `ER_SPECIFIC_ACCESS_DENIED_ERROR`
pub const ER_SPECIFIC_ACCESS_DENIED_ERROR: u16 = 1227;

const ACCESS_ERROR_CODES: &[u16] = &[
    ER_ACCESS_DENIED_ERROR,
    ER_BAD_HOST_ERROR,
    ER_DBACCESS_DENIED_ERROR,
    ER_BAD_DB_ERROR,
    ER_HOST_NOT_PRIVILEGED,
    ER_HOST_IS_BLOCKED,
    ER_SPECIFIC_ACCESS_DENIED_ERROR,
];

/// An error packet sent by the server in response to a query or handshake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error {code} ({state}): {message}")]
pub struct ServerError {
    /// Server error number, e.g. 1064.
    pub code: u16,
    /// SQLSTATE value, e.g. "42000".
    pub state: String,
    /// Human-readable message from the server.
    pub message: String,
}

impl ServerError {
    pub fn new(code: u16, state: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            state: state.into(),
            message: message.into(),
        }
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::ServerError> for ServerError {
    fn from(err: mysql_async::ServerError) -> Self {
        Self {
            code: err.code,
            state: err.state,
            message: err.message,
        }
    }
}

/// Extract the server error code, if `err` originated from the server.
fn server_error_code(err: &(dyn StdError + 'static)) -> Option<u16> {
    if let Some(server) = err.downcast_ref::<ServerError>() {
        return Some(server.code);
    }

    #[cfg(feature = "mysql")]
    if let Some(mysql_async::Error::Server(server)) = err.downcast_ref::<mysql_async::Error>() {
        return Some(server.code);
    }

    None
}

/// Returns true if `err` came from a database server, typically as a
/// response to a query or connection attempt.
pub fn is_database_error(err: &(dyn StdError + 'static)) -> bool {
    server_error_code(err).is_some()
}

/// Returns true if `err` is a SQL syntax error.
pub fn is_syntax_error(err: &(dyn StdError + 'static)) -> bool {
    matches!(
        server_error_code(err),
        Some(ER_PARSE_ERROR) | Some(ER_SYNTAX_ERROR)
    )
}

/// Returns true if `err` indicates an authentication or authorization
/// problem: bad credentials, client host not allowed, no access to the
/// requested default database, missing privilege. Retrying immediately is
/// pointless for these.
pub fn is_access_error(err: &(dyn StdError + 'static)) -> bool {
    server_error_code(err).is_some_and(|code| ACCESS_ERROR_CODES.contains(&code))
}
