//! Partitioning methods and partition-list rendering modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PartitionError, Result};

/// Normalize a method name: uppercase, single spaces between words.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// How rows map to partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PartitionMethod {
    Range,
    RangeColumns,
    List,
    ListColumns,
    Hash,
    LinearHash,
    Key,
    LinearKey,
}

impl PartitionMethod {
    pub const ALL: [PartitionMethod; 8] = [
        PartitionMethod::Range,
        PartitionMethod::RangeColumns,
        PartitionMethod::List,
        PartitionMethod::ListColumns,
        PartitionMethod::Hash,
        PartitionMethod::LinearHash,
        PartitionMethod::Key,
        PartitionMethod::LinearKey,
    ];

    /// Canonical SQL text, e.g. `"RANGE COLUMNS"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionMethod::Range => "RANGE",
            PartitionMethod::RangeColumns => "RANGE COLUMNS",
            PartitionMethod::List => "LIST",
            PartitionMethod::ListColumns => "LIST COLUMNS",
            PartitionMethod::Hash => "HASH",
            PartitionMethod::LinearHash => "LINEAR HASH",
            PartitionMethod::Key => "KEY",
            PartitionMethod::LinearKey => "LINEAR KEY",
        }
    }

    /// RANGE or RANGE COLUMNS.
    pub fn is_range_family(&self) -> bool {
        matches!(self, PartitionMethod::Range | PartitionMethod::RangeColumns)
    }

    /// LIST or LIST COLUMNS.
    pub fn is_list_family(&self) -> bool {
        matches!(self, PartitionMethod::List | PartitionMethod::ListColumns)
    }

    /// HASH, LINEAR HASH, KEY or LINEAR KEY.
    pub fn is_hash_or_key_family(&self) -> bool {
        !self.is_range_family() && !self.is_list_family()
    }

    /// Method name ends in `COLUMNS`.
    pub fn is_columns(&self) -> bool {
        matches!(
            self,
            PartitionMethod::RangeColumns | PartitionMethod::ListColumns
        )
    }

    /// Method name ends in `KEY`.
    pub fn is_key(&self) -> bool {
        matches!(self, PartitionMethod::Key | PartitionMethod::LinearKey)
    }

    /// Partitions carry boundary values (`VALUES LESS THAN` / `VALUES IN`).
    pub fn has_values(&self) -> bool {
        self.is_range_family() || self.is_list_family()
    }
}

impl FromStr for PartitionMethod {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        PartitionMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| PartitionError::InvalidMethod(s.to_string()))
    }
}

impl TryFrom<String> for PartitionMethod {
    type Error = PartitionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PartitionMethod> for String {
    fn from(m: PartitionMethod) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for PartitionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-partitioning method. Only hash and key variants are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubPartitionMethod {
    Hash,
    LinearHash,
    Key,
    LinearKey,
}

impl SubPartitionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubPartitionMethod::Hash => "HASH",
            SubPartitionMethod::LinearHash => "LINEAR HASH",
            SubPartitionMethod::Key => "KEY",
            SubPartitionMethod::LinearKey => "LINEAR KEY",
        }
    }
}

impl FromStr for SubPartitionMethod {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "HASH" => Ok(SubPartitionMethod::Hash),
            "LINEAR HASH" => Ok(SubPartitionMethod::LinearHash),
            "KEY" => Ok(SubPartitionMethod::Key),
            "LINEAR KEY" => Ok(SubPartitionMethod::LinearKey),
            _ => Err(PartitionError::InvalidMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for SubPartitionMethod {
    type Error = PartitionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SubPartitionMethod> for String {
    fn from(m: SubPartitionMethod) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for SubPartitionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the list of partitions appears in `SHOW CREATE TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionListMode {
    /// Infer from the partitions: `Count` unless any partition deviates
    /// from the auto-generated shape.
    #[default]
    Default,
    /// List each partition individually.
    Explicit,
    /// Just `PARTITIONS <n>`.
    Count,
    /// Omit list and count, implying a single partition.
    None,
}
