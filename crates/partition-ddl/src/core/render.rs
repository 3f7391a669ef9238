//! DDL rendering for partitioning clauses.
//!
//! Output must match `SHOW CREATE TABLE` byte for byte, since rendered
//! definitions are compared against live schemas. That includes the
//! server's odd spacing and its vendor/version-specific comment wrappers.

use tracing::warn;

use super::identifier::{escape_identifier, escape_value_for_create_table};
use super::method::{PartitionListMode, PartitionMethod};
use super::schema::{Partition, TablePartitioning};
use crate::dialect::Flavor;

/// Version-gated comment opener for partitioning (MySQL 5.1).
pub const PARTITIONING_OPENER: &str = "/*!50100";
/// Version-gated comment opener for RANGE/LIST COLUMNS (MySQL 5.5).
pub const COLUMNS_OPENER: &str = "/*!50500";
/// Closer paired with either opener.
pub const VERSION_GATE_CLOSER: &str = " */";

/// Choose the comment wrapper placed around a partitioning clause.
///
/// MariaDB 10.2+ prints no wrapper at all. Otherwise COLUMNS methods use the
/// 5.5 gate and everything else the 5.1 gate.
pub fn version_gate(method: PartitionMethod, flavor: &Flavor) -> (&'static str, &'static str) {
    if flavor.is_mariadb_10_2_plus() {
        ("", "")
    } else if method.is_columns() {
        (COLUMNS_OPENER, VERSION_GATE_CLOSER)
    } else {
        (PARTITIONING_OPENER, VERSION_GATE_CLOSER)
    }
}

/// Render the partitioning definition of a possibly-unpartitioned table.
///
/// Returns an empty string for `None`.
pub fn partitioning_definition(
    partitioning: Option<&TablePartitioning>,
    flavor: &Flavor,
) -> String {
    partitioning
        .map(|tp| tp.definition(flavor))
        .unwrap_or_default()
}

impl TablePartitioning {
    /// The overall partitioning definition for a table, beginning with a
    /// newline, as it appears at the end of `SHOW CREATE TABLE`.
    pub fn definition(&self, flavor: &Flavor) -> String {
        if self.is_sub_partitioned() {
            warn!(
                "Rendering sub-partitioned {} partitioning; sub-partitions are not fully supported",
                self.method
            );
        }

        let partitions_clause = match self.effective_list_mode() {
            PartitionListMode::Explicit => {
                let defs: Vec<String> = self
                    .partitions
                    .iter()
                    .map(|p| p.render(Some(self.method), flavor))
                    .collect();
                format!("\n({})", defs.join(",\n "))
            }
            PartitionListMode::Count => format!("\nPARTITIONS {}", self.partitions.len()),
            PartitionListMode::None | PartitionListMode::Default => String::new(),
        };

        let (opener, closer) = version_gate(self.method, flavor);

        format!(
            "\n{} PARTITION BY {}{}{}",
            opener,
            self.partition_by(flavor),
            partitions_clause,
            closer
        )
    }

    /// Resolve `Default` into `Count` or `Explicit`. Any partition that does
    /// not look auto-generated forces the explicit list.
    pub fn effective_list_mode(&self) -> PartitionListMode {
        match self.force_partition_list {
            PartitionListMode::Default => {
                let all_generated = self
                    .partitions
                    .iter()
                    .enumerate()
                    .all(|(n, p)| p.is_auto_generated(n));
                if all_generated {
                    PartitionListMode::Count
                } else {
                    PartitionListMode::Explicit
                }
            }
            mode => mode,
        }
    }

    /// The partitioning method and expression, formatted the way
    /// `SHOW CREATE TABLE` does it.
    pub(crate) fn partition_by(&self, flavor: &Flavor) -> String {
        let method = match self.method {
            PartitionMethod::RangeColumns => "RANGE  COLUMNS".to_string(),
            PartitionMethod::ListColumns => "LIST  COLUMNS".to_string(),
            m => format!("{} ", m),
        };

        let strip_quotes = (self.method == PartitionMethod::RangeColumns || self.method.is_key())
            && !flavor.is_mariadb_10_2_plus();
        let expression = if strip_quotes {
            self.expression.replace('`', "")
        } else {
            self.expression.clone()
        };

        format!("{}{}({})", method, self.algo_clause, expression)
    }
}

impl Partition {
    /// This partition's definition clause, for use inside an explicit
    /// partition list. A detached partition renders without a VALUES clause.
    pub fn definition(&self, flavor: &Flavor) -> String {
        self.render(self.method, flavor)
    }

    /// Render under `method`, which the owning table supplies.
    pub(crate) fn render(&self, method: Option<PartitionMethod>, flavor: &Flavor) -> String {
        let name = if flavor.is_mariadb_10_2_plus() {
            escape_identifier(&self.name)
        } else {
            self.name.clone()
        };

        let values = match method {
            Some(PartitionMethod::Range) if self.values == "MAXVALUE" => {
                "VALUES LESS THAN MAXVALUE ".to_string()
            }
            Some(m) if m.is_range_family() => format!("VALUES LESS THAN ({}) ", self.values),
            Some(m) if m.is_list_family() => format!("VALUES IN ({}) ", self.values),
            _ => String::new(),
        };

        let data_dir = if self.data_dir.is_empty() {
            String::new()
        } else {
            format!("DATA DIRECTORY = '{}' ", self.data_dir)
        };

        let comment = if self.comment.is_empty() {
            String::new()
        } else {
            format!("COMMENT = '{}' ", escape_value_for_create_table(&self.comment))
        };

        format!(
            "PARTITION {} {}{}{}ENGINE = {}",
            name, values, data_dir, comment, self.engine
        )
    }
}
