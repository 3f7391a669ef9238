//! Partitioning document validation.

use std::collections::HashSet;

use super::{Document, PartitioningConfig};
use crate::core::identifier::validate_identifier;
use crate::core::schema::MAX_PARTITIONS;
use crate::core::{PartitionListMode, PartitionMethod, SubPartitionMethod};
use crate::dialect::Flavor;
use crate::error::{PartitionError, Result};

/// Validate a document.
pub fn validate(doc: &Document) -> Result<()> {
    validate_identifier(&doc.table).map_err(|e| in_field("table", e))?;

    if let Some(ref flavor) = doc.flavor {
        flavor.parse::<Flavor>()?;
    }

    if let Some(ref partitioning) = doc.partitioning {
        validate_partitioning(partitioning)?;
    }

    Ok(())
}

/// Prefix a validation message with the offending field.
fn in_field(field: &str, err: PartitionError) -> PartitionError {
    match err {
        PartitionError::Validation(msg) => {
            PartitionError::Validation(format!("{}: {}", field, msg))
        }
        other => other,
    }
}

fn validate_partitioning(cfg: &PartitioningConfig) -> Result<()> {
    let method: PartitionMethod = cfg.method.parse()?;

    if cfg.expression.trim().is_empty() {
        return Err(PartitionError::Validation(
            "partitioning.expression is required".into(),
        ));
    }

    match cfg.sub_method {
        Some(ref sub) => {
            sub.parse::<SubPartitionMethod>()?;
            if cfg.sub_expression.trim().is_empty() {
                return Err(PartitionError::Validation(
                    "partitioning.sub_expression is required with sub_method".into(),
                ));
            }
        }
        None if !cfg.sub_expression.is_empty() => {
            return Err(PartitionError::Validation(
                "partitioning.sub_expression requires sub_method".into(),
            ));
        }
        None => {}
    }

    if let Some(algorithm) = cfg.key_algorithm {
        if !method.is_key() {
            return Err(PartitionError::Validation(format!(
                "partitioning.key_algorithm is only valid for KEY methods, not {}",
                method
            )));
        }
        if !(1..=2).contains(&algorithm) {
            return Err(PartitionError::Validation(format!(
                "partitioning.key_algorithm must be 1 or 2, got {}",
                algorithm
            )));
        }
    }

    let count = match cfg.partition_count {
        Some(_) if !cfg.partitions.is_empty() => {
            return Err(PartitionError::Validation(
                "partitioning.partition_count and partitioning.partitions are mutually exclusive"
                    .into(),
            ));
        }
        Some(_) if method.has_values() => {
            return Err(PartitionError::Validation(format!(
                "partitioning.partition_count is not valid for {}; list partitions with values",
                method
            )));
        }
        Some(n) => n,
        None => cfg.partitions.len(),
    };

    if count == 0 {
        return Err(PartitionError::Validation(
            "partitioning must have at least one partition".into(),
        ));
    }

    if count > MAX_PARTITIONS {
        return Err(PartitionError::Validation(format!(
            "partitioning has {} partitions, the maximum is {}",
            count, MAX_PARTITIONS
        )));
    }

    if cfg.list_mode == PartitionListMode::None && count != 1 {
        return Err(PartitionError::Validation(format!(
            "partitioning.list_mode 'none' implies exactly one partition, got {}",
            count
        )));
    }

    let mut seen = HashSet::new();
    for (n, p) in cfg.partitions.iter().enumerate() {
        validate_identifier(&p.name)
            .map_err(|e| in_field(&format!("partitions[{}].name", n), e))?;

        if !seen.insert(p.name.to_lowercase()) {
            return Err(PartitionError::Validation(format!(
                "duplicate partition name '{}'",
                p.name
            )));
        }

        if method.has_values() && p.values.trim().is_empty() {
            return Err(PartitionError::Validation(format!(
                "partition '{}' requires values for {} partitioning",
                p.name, method
            )));
        }
        if !method.has_values() && !p.values.is_empty() {
            return Err(PartitionError::Validation(format!(
                "partition '{}' cannot have values for {} partitioning",
                p.name, method
            )));
        }

        if p.engine.trim().is_empty() {
            return Err(PartitionError::Validation(format!(
                "partition '{}' has an empty engine",
                p.name
            )));
        }
    }

    Ok(())
}
