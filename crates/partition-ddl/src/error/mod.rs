//! Error types for partitioning documents, flavors and the CLI.
//!
//! Rendering and diffing never fail: an inexpressible diff is reported
//! through the `supported` flag of [`TablePartitioning::diff`], not through
//! this type.
//!
//! [`TablePartitioning::diff`]: crate::core::TablePartitioning::diff

pub mod server;

use thiserror::Error;

pub use server::{is_access_error, is_database_error, is_syntax_error, ServerError};

/// Main error type for partition-ddl operations.
#[derive(Error, Debug)]
pub enum PartitionError {
    /// Configuration error (missing fields, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Partitioning method outside the eight supported names
    #[error("Invalid partitioning method: {0:?}")]
    InvalidMethod(String),

    /// Flavor string that is not `vendor:major.minor[.patch]`
    #[error("Invalid flavor: {0:?}")]
    InvalidFlavor(String),

    /// Partitioning document failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The two partitioning schemes differ in a way no ALTER clause can express
    #[error("Unsupported alteration of partitioning for table {table}")]
    UnsupportedAlteration { table: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PartitionError {
    /// Create an UnsupportedAlteration error
    pub fn unsupported(table: impl Into<String>) -> Self {
        PartitionError::UnsupportedAlteration {
            table: table.into(),
        }
    }

    /// Process exit status used by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PartitionError::Config(_)
            | PartitionError::InvalidMethod(_)
            | PartitionError::InvalidFlavor(_)
            | PartitionError::Validation(_)
            | PartitionError::Yaml(_)
            | PartitionError::Json(_) => 1,
            PartitionError::UnsupportedAlteration { .. } => 4,
            PartitionError::Io(_) => 7,
        }
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for partition-ddl operations.
pub type Result<T> = std::result::Result<T, PartitionError>;
