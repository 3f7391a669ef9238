//! Core partitioning model, rendering and diff.
//!
//! - [`schema`]: `TablePartitioning` and `Partition` snapshots
//! - [`method`]: partitioning methods and partition-list modes
//! - [`render`]: `SHOW CREATE TABLE`-exact DDL rendering
//! - [`diff`]: alteration clauses between two snapshots
//! - [`identifier`]: identifier and value escaping
//!
//! Everything here is pure: no I/O, no shared state, safe to call from any
//! number of threads on the same values.

pub mod diff;
pub mod identifier;
pub mod method;
pub mod render;
pub mod schema;

pub use diff::{alter_table_statement, AlterClause, PartitioningMode, StatementModifiers};
pub use method::{PartitionListMode, PartitionMethod, SubPartitionMethod};
pub use render::{partitioning_definition, version_gate};
pub use schema::{Partition, TablePartitioning, DEFAULT_ENGINE, MAX_PARTITIONS};
