//! Partitioning document type definitions.

use serde::{Deserialize, Serialize};

use crate::core::PartitionListMode;
use crate::core::DEFAULT_ENGINE;

/// Root document: one table's partitioning snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Table name, used when rendering `ALTER TABLE`.
    pub table: String,

    /// Server flavor, e.g. "mysql:8.0" or "mariadb:10.6.4".
    #[serde(default)]
    pub flavor: Option<String>,

    /// Partitioning configuration; absent for an unpartitioned table.
    #[serde(default)]
    pub partitioning: Option<PartitioningConfig>,
}

/// Table-level partitioning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitioningConfig {
    /// One of RANGE, RANGE COLUMNS, LIST, LIST COLUMNS, HASH, LINEAR HASH,
    /// KEY, LINEAR KEY.
    pub method: String,

    /// Partitioning expression or column list.
    #[serde(default)]
    pub expression: String,

    /// Sub-partitioning method (HASH/KEY variants only).
    #[serde(default)]
    pub sub_method: Option<String>,

    /// Sub-partitioning expression.
    #[serde(default)]
    pub sub_expression: String,

    /// KEY algorithm (1 or 2), KEY methods only.
    #[serde(default)]
    pub key_algorithm: Option<u8>,

    /// How the partition list is rendered (default: inferred).
    #[serde(default)]
    pub list_mode: PartitionListMode,

    /// Explicit partitions in declaration order.
    #[serde(default)]
    pub partitions: Vec<PartitionConfig>,

    /// Number of auto-named partitions (`p0`..), instead of `partitions`.
    #[serde(default)]
    pub partition_count: Option<usize>,

    /// Engine for auto-named partitions (default: "InnoDB").
    #[serde(default = "default_engine")]
    pub engine: String,
}

/// A single partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionConfig {
    pub name: String,

    #[serde(default)]
    pub sub_name: String,

    /// Boundary values, RANGE and LIST methods only.
    #[serde(default)]
    pub values: String,

    #[serde(default)]
    pub comment: String,

    /// Storage engine (default: "InnoDB").
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Raw (unescaped) data directory path.
    #[serde(default)]
    pub data_directory: Option<String>,
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}
