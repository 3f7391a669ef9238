//! Diffing two partitioning snapshots into ALTER TABLE clauses.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::identifier::escape_identifier;
use super::schema::TablePartitioning;
use crate::dialect::Flavor;

/// One piece of an `ALTER TABLE` statement affecting partitioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterClause {
    /// Partition an unpartitioned table, or re-partition a partitioned one.
    PartitionBy {
        partitioning: TablePartitioning,
        /// True when the method or expression changes on an already
        /// partitioned table.
        repartition: bool,
    },
    /// Remove partitioning from a partitioned table.
    RemovePartitioning,
    /// Placeholder: the partition list of a RANGE or LIST table changed.
    /// Carries no detail and renders no DDL; it exists so a real difference
    /// is never mistaken for an unsupported one.
    ModifyPartitions,
}

/// How partitioning changes are applied when rendering clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitioningMode {
    /// Apply every partitioning change.
    #[default]
    Permissive,
    /// Never introduce partitioning; still remove it.
    Remove,
    /// Never remove existing partitioning.
    Keep,
}

/// Options that affect how clauses render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatementModifiers {
    pub flavor: Flavor,
    pub partitioning: PartitioningMode,
}

impl StatementModifiers {
    pub fn new(flavor: Flavor) -> Self {
        Self {
            flavor,
            partitioning: PartitioningMode::default(),
        }
    }

    pub fn with_partitioning(mut self, mode: PartitioningMode) -> Self {
        self.partitioning = mode;
        self
    }
}

impl AlterClause {
    /// Stable snake_case name of the clause variant.
    pub fn kind(&self) -> &'static str {
        match self {
            AlterClause::PartitionBy { repartition: true, .. } => "repartition",
            AlterClause::PartitionBy { .. } => "partition_by",
            AlterClause::RemovePartitioning => "remove_partitioning",
            AlterClause::ModifyPartitions => "modify_partitions",
        }
    }

    /// Text of this clause within `ALTER TABLE`, or an empty string if it
    /// should be omitted under `mods`.
    pub fn clause(&self, mods: &StatementModifiers) -> String {
        match self {
            AlterClause::PartitionBy { partitioning, .. } => {
                if mods.partitioning == PartitioningMode::Remove {
                    return String::new();
                }
                partitioning.definition(&mods.flavor).trim().to_string()
            }
            AlterClause::RemovePartitioning => {
                if mods.partitioning == PartitioningMode::Keep {
                    return String::new();
                }
                "REMOVE PARTITIONING".to_string()
            }
            AlterClause::ModifyPartitions => String::new(),
        }
    }
}

impl TablePartitioning {
    /// Compute the clauses that transform `from` into `to`. `None` on either
    /// side means that table is unpartitioned.
    ///
    /// The second value is false when the schemes differ in a way no clause
    /// can express; callers must treat that as an unsupported alteration
    /// rather than executing the (empty) clause list.
    pub fn diff(
        from: Option<&TablePartitioning>,
        to: Option<&TablePartitioning>,
    ) -> (Vec<AlterClause>, bool) {
        let (from, to) = match (from, to) {
            (None, None) => return (Vec::new(), true),
            (None, Some(to)) => {
                debug!("Adding {} partitioning", to.method);
                let clause = AlterClause::PartitionBy {
                    partitioning: to.clone(),
                    repartition: false,
                };
                return (vec![clause], true);
            }
            (Some(from), None) => {
                debug!("Removing {} partitioning", from.method);
                return (vec![AlterClause::RemovePartitioning], true);
            }
            (Some(from), Some(to)) => (from, to),
        };

        if from.method != to.method
            || from.sub_method != to.sub_method
            || from.expression != to.expression
            || from.sub_expression != to.sub_expression
        {
            debug!(
                "Re-partitioning from {} ({}) to {} ({})",
                from.method, from.expression, to.method, to.expression
            );
            let clause = AlterClause::PartitionBy {
                partitioning: to.clone(),
                repartition: true,
            };
            return (vec![clause], true);
        }

        // Order matters: partitions are stored physically in declaration order.
        if from.partitions == to.partitions {
            return (Vec::new(), true);
        }

        if from.method.has_values() {
            debug!(
                "Partition list of {} table changed ({} -> {} partitions)",
                from.method,
                from.partitions.len(),
                to.partitions.len()
            );
            (vec![AlterClause::ModifyPartitions], true)
        } else {
            debug!(
                "Partition list change for {} partitioning is not supported",
                from.method
            );
            (Vec::new(), false)
        }
    }

    /// Method form of [`TablePartitioning::diff`] for a partitioned receiver.
    pub fn diff_to(&self, other: Option<&TablePartitioning>) -> (Vec<AlterClause>, bool) {
        TablePartitioning::diff(Some(self), other)
    }
}

/// Join the non-empty clause texts into one `ALTER TABLE` statement.
///
/// Returns `None` when every clause renders empty under `mods`.
pub fn alter_table_statement(
    table: &str,
    clauses: &[AlterClause],
    mods: &StatementModifiers,
) -> Option<String> {
    let parts: Vec<String> = clauses
        .iter()
        .map(|c| c.clause(mods))
        .filter(|c| !c.is_empty())
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(format!(
        "ALTER TABLE {} {}",
        escape_identifier(table),
        parts.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::method::{PartitionListMode, PartitionMethod, SubPartitionMethod};
    use crate::core::schema::Partition;
    use crate::dialect::Vendor;

    fn range_table() -> TablePartitioning {
        TablePartitioning::new(PartitionMethod::Range, "id")
            .with_partition(Partition::new("p0").with_values("10"))
            .with_partition(Partition::new("p1").with_values("MAXVALUE"))
    }

    fn hash_table(count: usize) -> TablePartitioning {
        TablePartitioning::new(PartitionMethod::Hash, "id").with_partition_count(count, "InnoDB")
    }

    fn mods() -> StatementModifiers {
        StatementModifiers::new(Flavor::new(Vendor::MySQL, 8, 0, 0))
    }

    // =========================================================================
    // Absent-side tests
    // =========================================================================

    #[test]
    fn test_diff_both_absent() {
        assert_eq!(TablePartitioning::diff(None, None), (vec![], true));
    }

    #[test]
    fn test_diff_add_partitioning() {
        let tp = range_table();
        let (clauses, supported) = TablePartitioning::diff(None, Some(&tp));
        assert!(supported);
        assert_eq!(
            clauses,
            vec![AlterClause::PartitionBy {
                partitioning: tp,
                repartition: false
            }]
        );
    }

    #[test]
    fn test_diff_remove_partitioning() {
        let tp = hash_table(4);
        let (clauses, supported) = tp.diff_to(None);
        assert!(supported);
        assert_eq!(clauses, vec![AlterClause::RemovePartitioning]);
    }

    // =========================================================================
    // Same-table tests
    // =========================================================================

    #[test]
    fn test_diff_identical_is_empty() {
        for tp in [range_table(), hash_table(3)] {
            assert_eq!(tp.diff_to(Some(&tp)), (vec![], true));
            let copy = tp.clone();
            assert_eq!(tp.diff_to(Some(&copy)), (vec![], true));
        }
    }

    #[test]
    fn test_diff_ignores_list_mode_override() {
        let a = hash_table(2);
        let b = hash_table(2).with_partition_list_mode(PartitionListMode::Explicit);
        assert_eq!(a.diff_to(Some(&b)), (vec![], true));
    }

    // =========================================================================
    // Re-partition tests
    // =========================================================================

    #[test]
    fn test_diff_method_change_repartitions() {
        let from = hash_table(4);
        let to =
            TablePartitioning::new(PartitionMethod::Key, "id").with_partition_count(4, "InnoDB");
        let (clauses, supported) = from.diff_to(Some(&to));
        assert!(supported);
        assert_eq!(
            clauses,
            vec![AlterClause::PartitionBy {
                partitioning: to,
                repartition: true
            }]
        );
    }

    #[test]
    fn test_diff_expression_change_repartitions() {
        let from = range_table();
        let mut to = range_table();
        to.expression = "customer_id".to_string();
        let (clauses, supported) = from.diff_to(Some(&to));
        assert!(supported);
        assert!(matches!(
            clauses.as_slice(),
            [AlterClause::PartitionBy { repartition: true, .. }]
        ));
    }

    #[test]
    fn test_diff_sub_partitioning_change_repartitions() {
        let from = range_table();
        let to = range_table().with_sub_partitioning(SubPartitionMethod::Hash, "id");
        let (clauses, supported) = from.diff_to(Some(&to));
        assert!(supported);
        assert!(matches!(
            clauses.as_slice(),
            [AlterClause::PartitionBy { repartition: true, .. }]
        ));
    }

    // =========================================================================
    // Partition list tests
    // =========================================================================

    #[test]
    fn test_diff_range_values_change_modifies_partitions() {
        let from = range_table();
        let to = TablePartitioning::new(PartitionMethod::Range, "id")
            .with_partition(Partition::new("p0").with_values("20"))
            .with_partition(Partition::new("p1").with_values("MAXVALUE"));
        assert_eq!(
            from.diff_to(Some(&to)),
            (vec![AlterClause::ModifyPartitions], true)
        );
    }

    #[test]
    fn test_diff_list_added_partition_modifies_partitions() {
        let from = TablePartitioning::new(PartitionMethod::ListColumns, "region")
            .with_partition(Partition::new("east").with_values("'NY'"));
        let to = from
            .clone()
            .with_partition(Partition::new("west").with_values("'CA'"));
        assert_eq!(
            from.diff_to(Some(&to)),
            (vec![AlterClause::ModifyPartitions], true)
        );
    }

    #[test]
    fn test_diff_reordered_partitions_is_a_difference() {
        let from = TablePartitioning::new(PartitionMethod::List, "x")
            .with_partition(Partition::new("a").with_values("1"))
            .with_partition(Partition::new("b").with_values("2"));
        let to = TablePartitioning::new(PartitionMethod::List, "x")
            .with_partition(Partition::new("b").with_values("2"))
            .with_partition(Partition::new("a").with_values("1"));
        assert_eq!(
            from.diff_to(Some(&to)),
            (vec![AlterClause::ModifyPartitions], true)
        );
    }

    #[test]
    fn test_diff_hash_count_change_unsupported() {
        assert_eq!(hash_table(4).diff_to(Some(&hash_table(8))), (vec![], false));
    }

    #[test]
    fn test_diff_key_comment_change_unsupported() {
        let from = TablePartitioning::new(PartitionMethod::LinearKey, "id")
            .with_partition(Partition::new("p0"));
        let to = TablePartitioning::new(PartitionMethod::LinearKey, "id")
            .with_partition(Partition::new("p0").with_comment("hot"));
        assert_eq!(from.diff_to(Some(&to)), (vec![], false));
    }

    #[test]
    fn test_diff_engine_change_is_a_difference() {
        let from = hash_table(1);
        let to = TablePartitioning::new(PartitionMethod::Hash, "id")
            .with_partition(Partition::new("p0").with_engine("MyISAM"));
        assert_eq!(from.diff_to(Some(&to)), (vec![], false));
    }

    // =========================================================================
    // Clause rendering tests
    // =========================================================================

    #[test]
    fn test_clause_partition_by_trims_definition() {
        let clause = AlterClause::PartitionBy {
            partitioning: hash_table(4),
            repartition: false,
        };
        assert_eq!(
            clause.clause(&mods()),
            "/*!50100 PARTITION BY HASH (id)\nPARTITIONS 4 */"
        );
    }

    #[test]
    fn test_clause_partition_by_mariadb_has_no_leading_space() {
        let mods = StatementModifiers::new(Flavor::new(Vendor::MariaDB, 10, 6, 0));
        let clause = AlterClause::PartitionBy {
            partitioning: hash_table(2),
            repartition: true,
        };
        assert_eq!(clause.clause(&mods), "PARTITION BY HASH (id)\nPARTITIONS 2");
    }

    #[test]
    fn test_clause_modes() {
        let add = AlterClause::PartitionBy {
            partitioning: hash_table(2),
            repartition: false,
        };
        let remove = AlterClause::RemovePartitioning;

        let keep = mods().with_partitioning(PartitioningMode::Keep);
        assert!(!add.clause(&keep).is_empty());
        assert_eq!(remove.clause(&keep), "");

        let removing = mods().with_partitioning(PartitioningMode::Remove);
        assert_eq!(add.clause(&removing), "");
        assert_eq!(remove.clause(&removing), "REMOVE PARTITIONING");

        assert_eq!(remove.clause(&mods()), "REMOVE PARTITIONING");
    }

    #[test]
    fn test_clause_modify_partitions_is_empty() {
        assert_eq!(AlterClause::ModifyPartitions.clause(&mods()), "");
    }

    #[test]
    fn test_clause_kind() {
        let tp = TablePartitioning::new(PartitionMethod::Hash, "id");
        let add = AlterClause::PartitionBy {
            partitioning: tp.clone(),
            repartition: false,
        };
        let redo = AlterClause::PartitionBy {
            partitioning: tp,
            repartition: true,
        };
        assert_eq!(add.kind(), "partition_by");
        assert_eq!(redo.kind(), "repartition");
        assert_eq!(AlterClause::RemovePartitioning.kind(), "remove_partitioning");
        assert_eq!(AlterClause::ModifyPartitions.kind(), "modify_partitions");
    }

    #[test]
    fn test_alter_table_statement() {
        let stmt = alter_table_statement("orders", &[AlterClause::RemovePartitioning], &mods());
        assert_eq!(stmt.as_deref(), Some("ALTER TABLE `orders` REMOVE PARTITIONING"));

        assert_eq!(
            alter_table_statement("orders", &[AlterClause::ModifyPartitions], &mods()),
            None
        );
        assert_eq!(alter_table_statement("orders", &[], &mods()), None);
    }
}
