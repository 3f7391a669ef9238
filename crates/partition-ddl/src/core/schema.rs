//! Partitioning metadata for a single table.
//!
//! Both types are immutable snapshots of what introspection found on the
//! server. An unpartitioned table has no [`TablePartitioning`] at all, so
//! every entry point that accepts one takes `Option<&TablePartitioning>`.

use super::method::{PartitionListMode, PartitionMethod, SubPartitionMethod};

/// Storage engine assumed when a partition does not name one.
pub const DEFAULT_ENGINE: &str = "InnoDB";

/// Most partitions a MySQL table may have, sub-partitions included.
pub const MAX_PARTITIONS: usize = 8192;

/// Partitioning configuration for a partitioned table.
///
/// Sub-partitioning fields may be populated, but the rest of this crate only
/// compares them for equality; multi-level partitioning is not fully
/// supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePartitioning {
    pub(crate) method: PartitionMethod,
    pub sub_method: Option<SubPartitionMethod>,
    pub expression: String,
    /// Empty if no sub-partitioning.
    pub sub_expression: String,
    /// In declaration order. Only `with_partition` appends, so every entry
    /// carries this table's method.
    pub(crate) partitions: Vec<Partition>,
    pub(crate) force_partition_list: PartitionListMode,
    /// Full text of the optional ALGORITHM clause for KEY or LINEAR KEY,
    /// including its trailing space.
    pub(crate) algo_clause: String,
}

impl TablePartitioning {
    pub fn new(method: PartitionMethod, expression: impl Into<String>) -> Self {
        Self {
            method,
            sub_method: None,
            expression: expression.into(),
            sub_expression: String::new(),
            partitions: Vec::new(),
            force_partition_list: PartitionListMode::Default,
            algo_clause: String::new(),
        }
    }

    pub fn with_sub_partitioning(
        mut self,
        method: SubPartitionMethod,
        expression: impl Into<String>,
    ) -> Self {
        self.sub_method = Some(method);
        self.sub_expression = expression.into();
        self
    }

    /// Append a partition. The partition inherits this table's method.
    pub fn with_partition(mut self, mut partition: Partition) -> Self {
        partition.method = Some(self.method);
        self.partitions.push(partition);
        self
    }

    /// Append `count` auto-named partitions (`p0`, `p1`, ...) as created by
    /// `PARTITIONS <n>`.
    pub fn with_partition_count(mut self, count: usize, engine: &str) -> Self {
        let start = self.partitions.len();
        for n in start..start + count {
            self = self.with_partition(Partition::new(format!("p{}", n)).with_engine(engine));
        }
        self
    }

    /// Override how the partition list is rendered.
    pub fn with_partition_list_mode(mut self, mode: PartitionListMode) -> Self {
        self.force_partition_list = mode;
        self
    }

    /// Set the `ALGORITHM = n` clause. Only meaningful for KEY methods.
    pub fn with_key_algorithm(mut self, algorithm: u8) -> Self {
        self.algo_clause = format!("ALGORITHM = {} ", algorithm);
        self
    }

    pub fn method(&self) -> PartitionMethod {
        self.method
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn partition_list_mode(&self) -> PartitionListMode {
        self.force_partition_list
    }

    pub fn algo_clause(&self) -> &str {
        &self.algo_clause
    }

    /// Returns true if sub-partitioning fields are populated.
    pub fn is_sub_partitioned(&self) -> bool {
        self.sub_method.is_some() || !self.sub_expression.is_empty()
    }
}

/// A single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub name: String,
    /// Empty if no sub-partitioning.
    pub sub_name: String,
    /// Only populated for RANGE or LIST.
    pub values: String,
    /// Raw, unescaped.
    pub comment: String,
    /// Set when the partition is attached to a table.
    pub(crate) method: Option<PartitionMethod>,
    pub(crate) engine: String,
    /// Already escaped for use inside single quotes.
    pub(crate) data_dir: String,
}

impl Partition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_name: String::new(),
            values: String::new(),
            comment: String::new(),
            method: None,
            engine: DEFAULT_ENGINE.to_string(),
            data_dir: String::new(),
        }
    }

    pub fn with_values(mut self, values: impl Into<String>) -> Self {
        self.values = values.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// `dir` must already be escaped for a single-quoted SQL literal.
    pub fn with_data_dir(mut self, dir: impl Into<String>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_sub_name(mut self, sub_name: impl Into<String>) -> Self {
        self.sub_name = sub_name.into();
        self
    }

    /// The owning table's method, or `None` for a detached partition.
    pub fn method(&self) -> Option<PartitionMethod> {
        self.method
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    /// Returns true if this partition looks like one the server generated
    /// for `PARTITIONS <n>`: positional name, no values, comment or data dir.
    pub(crate) fn is_auto_generated(&self, position: usize) -> bool {
        self.values.is_empty()
            && self.comment.is_empty()
            && self.data_dir.is_empty()
            && self.name == format!("p{}", position)
    }
}
