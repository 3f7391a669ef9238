//! # partition-ddl
//!
//! Table partitioning for MySQL-family schema diffing.
//!
//! This library models how a table's rows are split into partitions and
//! provides:
//!
//! - **Rendering** of `PARTITION BY` clauses byte-exact to `SHOW CREATE TABLE`
//!   for MySQL, Percona Server and MariaDB across versions
//! - **Diffing** of two partitioning snapshots into `ALTER TABLE` clauses,
//!   with an explicit flag for changes that cannot be expressed
//! - **Documents**: YAML snapshots of a table's partitioning
//! - **Server error classification** for the surrounding connection layer
//!
//! ## Example
//!
//! ```rust
//! use partition_ddl::{Flavor, Partition, PartitionMethod, TablePartitioning};
//!
//! let flavor: Flavor = "mysql:8.0".parse().unwrap();
//! let tp = TablePartitioning::new(PartitionMethod::Range, "id")
//!     .with_partition(Partition::new("p0").with_values("10"))
//!     .with_partition(Partition::new("p1").with_values("MAXVALUE"));
//!
//! assert!(tp.definition(&flavor).starts_with("\n/*!50100 PARTITION BY RANGE (id)"));
//!
//! let (clauses, supported) = TablePartitioning::diff(Some(&tp), None);
//! assert!(supported);
//! assert_eq!(clauses.len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod dialect;
pub mod error;

// Re-exports for convenient access
pub use config::Document;
pub use crate::core::{
    alter_table_statement, partitioning_definition, AlterClause, Partition, PartitionListMode,
    PartitionMethod, PartitioningMode, StatementModifiers, SubPartitionMethod, TablePartitioning,
};
pub use dialect::{Flavor, Vendor};
pub use error::{PartitionError, Result};
