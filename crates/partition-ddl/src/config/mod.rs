//! Partitioning document loading and validation.
//!
//! A document is a YAML snapshot of one table's partitioning, standing in
//! for what introspection would read from `information_schema`.

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use tracing::debug;

use crate::core::identifier::escape_value_for_create_table;
use crate::core::schema::MAX_PARTITIONS;
use crate::core::{Partition, PartitionMethod, SubPartitionMethod, TablePartitioning};
use crate::dialect::Flavor;
use crate::error::{PartitionError, Result};

impl Document {
    /// Load a document from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let doc = Self::from_yaml(&content)?;
        debug!("Loaded partitioning document for table {} from {:?}", doc.table, path.as_ref());
        Ok(doc)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let doc: Document = serde_yaml::from_str(yaml)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Validate the document.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }

    /// The document's flavor, if it names one.
    pub fn flavor(&self) -> Result<Option<Flavor>> {
        self.flavor.as_deref().map(str::parse::<Flavor>).transpose()
    }

    /// Build the partitioning snapshot. `None` means unpartitioned.
    pub fn to_partitioning(&self) -> Result<Option<TablePartitioning>> {
        self.partitioning
            .as_ref()
            .map(PartitioningConfig::to_partitioning)
            .transpose()
    }
}

impl PartitioningConfig {
    /// Build the partitioning snapshot described by this configuration.
    pub fn to_partitioning(&self) -> Result<TablePartitioning> {
        let method: PartitionMethod = self.method.parse()?;
        let mut tp = TablePartitioning::new(method, self.expression.clone())
            .with_partition_list_mode(self.list_mode);

        if let Some(ref sub) = self.sub_method {
            let sub: SubPartitionMethod = sub.parse()?;
            tp = tp.with_sub_partitioning(sub, self.sub_expression.clone());
        }

        if let Some(algorithm) = self.key_algorithm {
            tp = tp.with_key_algorithm(algorithm);
        }

        if let Some(count) = self.partition_count {
            if count > MAX_PARTITIONS {
                return Err(PartitionError::Validation(format!(
                    "partition_count {} exceeds the maximum of {}",
                    count, MAX_PARTITIONS
                )));
            }
            return Ok(tp.with_partition_count(count, &self.engine));
        }

        for p in &self.partitions {
            let mut partition = Partition::new(p.name.clone())
                .with_sub_name(p.sub_name.clone())
                .with_values(p.values.clone())
                .with_comment(p.comment.clone())
                .with_engine(p.engine.clone());
            if let Some(ref dir) = p.data_directory {
                partition = partition.with_data_dir(escape_value_for_create_table(dir));
            }
            tp = tp.with_partition(partition);
        }

        Ok(tp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PartitionListMode;
    use crate::dialect::Vendor;
    use crate::error::PartitionError;
    use std::io::Write;

    const RANGE_DOC: &str = r#"
table: orders
flavor: mysql:5.7
partitioning:
  method: RANGE
  expression: id
  partitions:
    - name: p0
      values: "10"
      comment: first
    - name: p1
      values: MAXVALUE
      data_directory: C:\data
"#;

    #[test]
    fn test_from_yaml_range() {
        let doc = Document::from_yaml(RANGE_DOC).unwrap();
        assert_eq!(doc.table, "orders");
        assert_eq!(
            doc.flavor().unwrap(),
            Some(Flavor::new(Vendor::MySQL, 5, 7, 0))
        );

        let tp = doc.to_partitioning().unwrap().unwrap();
        assert_eq!(tp.method(), PartitionMethod::Range);
        assert_eq!(tp.partitions().len(), 2);
        assert_eq!(tp.partitions()[0].comment, "first");
        assert_eq!(tp.partitions()[1].method(), Some(PartitionMethod::Range));
        assert_eq!(tp.partitions()[1].data_dir(), "C:\\\\data");
    }

    #[test]
    fn test_from_yaml_unpartitioned() {
        let doc = Document::from_yaml("table: plain\n").unwrap();
        assert!(doc.to_partitioning().unwrap().is_none());
        assert!(doc.flavor().unwrap().is_none());
    }

    #[test]
    fn test_from_yaml_partition_count() {
        let yaml = r#"
table: events
partitioning:
  method: linear key
  expression: "`id`"
  key_algorithm: 2
  partition_count: 3
  engine: MyISAM
"#;
        let tp = Document::from_yaml(yaml)
            .unwrap()
            .to_partitioning()
            .unwrap()
            .unwrap();
        assert_eq!(tp.method(), PartitionMethod::LinearKey);
        assert_eq!(tp.algo_clause(), "ALGORITHM = 2 ");
        assert_eq!(tp.partitions().len(), 3);
        assert_eq!(tp.partitions()[2].name, "p2");
        assert_eq!(tp.partitions()[2].engine(), "MyISAM");
    }

    #[test]
    fn test_from_yaml_list_mode_and_sub_partitioning() {
        let yaml = r#"
table: t
partitioning:
  method: RANGE
  expression: YEAR(d)
  sub_method: HASH
  sub_expression: id
  list_mode: explicit
  partitions:
    - name: p0
      sub_name: s0
      values: "2020"
"#;
        let tp = Document::from_yaml(yaml)
            .unwrap()
            .to_partitioning()
            .unwrap()
            .unwrap();
        assert_eq!(tp.partition_list_mode(), PartitionListMode::Explicit);
        assert_eq!(tp.sub_method, Some(SubPartitionMethod::Hash));
        assert_eq!(tp.partitions()[0].sub_name, "s0");
    }

    #[test]
    fn test_from_yaml_invalid_yaml() {
        let err = Document::from_yaml("table: [").unwrap_err();
        assert!(matches!(err, PartitionError::Yaml(_)));
    }

    #[test]
    fn test_from_yaml_runs_validation() {
        let yaml = "table: t\npartitioning:\n  method: HASH\n  expression: id\n";
        let err = Document::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, PartitionError::Validation(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", RANGE_DOC).unwrap();
        let doc = Document::load(file.path()).unwrap();
        assert_eq!(doc.table, "orders");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Document::load("/nonexistent/partitioning.yaml").unwrap_err();
        assert!(matches!(err, PartitionError::Io(_)));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_to_partitioning_rejects_oversized_count() {
        let cfg = PartitioningConfig {
            method: "HASH".to_string(),
            expression: "id".to_string(),
            sub_method: None,
            sub_expression: String::new(),
            key_algorithm: None,
            list_mode: PartitionListMode::Default,
            partitions: Vec::new(),
            partition_count: Some(MAX_PARTITIONS + 1),
            engine: "InnoDB".to_string(),
        };
        assert!(matches!(
            cfg.to_partitioning(),
            Err(PartitionError::Validation(_))
        ));
    }
}
