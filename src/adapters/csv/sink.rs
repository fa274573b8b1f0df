//! Conformed sink writing one CSV file per entity

use crate::adapters::storage::traits::ConformedSink;
use crate::domain::{ConformedBatch, Entity, Result, SinkError};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Writes `<table>.csv` files into a directory
///
/// A replace writes the new snapshot next to the old one and renames it into
/// place, so readers see either the previous file or the complete new one.
pub struct CsvSink {
    directory: PathBuf,
}

impl CsvSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Final location of an entity's conformed file
    pub fn path_for(&self, entity: Entity) -> PathBuf {
        self.directory.join(entity.conformed_file_name())
    }
}

/// Encode rows with a header line. An empty set encodes to an empty file.
pub(crate) fn encode_rows<T: Serialize>(entity: Entity, rows: &[T]) -> Result<Vec<u8>> {
    let write_failed = |message: String| SinkError::WriteFailed { entity, message };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| write_failed(e.to_string()))?;
    }
    Ok(writer
        .into_inner()
        .map_err(|e| write_failed(e.to_string()))?)
}

/// Encode a conformed batch as CSV
pub fn encode_conformed_batch(batch: &ConformedBatch) -> Result<Vec<u8>> {
    let entity = batch.entity();
    match batch {
        ConformedBatch::Customers(rows) => encode_rows(entity, rows),
        ConformedBatch::Products(rows) => encode_rows(entity, rows),
        ConformedBatch::Sales(rows) => encode_rows(entity, rows),
        ConformedBatch::Demographics(rows) => encode_rows(entity, rows),
        ConformedBatch::Locations(rows) => encode_rows(entity, rows),
        ConformedBatch::Categories(rows) => encode_rows(entity, rows),
    }
}

#[async_trait]
impl ConformedSink for CsvSink {
    fn describe(&self) -> String {
        format!("csv:{}", self.directory.display())
    }

    async fn ensure_schema(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| {
                SinkError::SchemaFailed(format!(
                    "Failed to create {}: {}",
                    self.directory.display(),
                    e
                ))
            })?;
        Ok(())
    }

    async fn replace(&self, batch: &ConformedBatch) -> Result<usize> {
        let entity = batch.entity();
        let bytes = encode_conformed_batch(batch)?;

        let target = self.path_for(entity);
        let staging = target.with_extension("csv.tmp");

        if let Err(e) = tokio::fs::write(&staging, &bytes).await {
            return Err(SinkError::WriteFailed {
                entity,
                message: format!("{}: {}", staging.display(), e),
            }
            .into());
        }

        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            // leave no half-published staging file behind
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(SinkError::WriteFailed {
                entity,
                message: format!("{}: {}", target.display(), e),
            }
            .into());
        }

        tracing::debug!(
            entity = %entity,
            path = %target.display(),
            rows = batch.len(),
            "Replaced conformed file"
        );
        Ok(batch.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    #[test]
    fn test_encode_writes_header_and_rows() {
        let batch = ConformedBatch::Locations(vec![Location {
            id: Some("AW00011000".to_string()),
            country: "Germany".to_string(),
        }]);

        let bytes = encode_conformed_batch(&batch).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "cid,cntry\nAW00011000,Germany\n"
        );
    }

    #[test]
    fn test_encode_empty_set_is_empty() {
        let bytes = encode_conformed_batch(&ConformedBatch::Locations(Vec::new())).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_path_for_uses_table_name() {
        let sink = CsvSink::new("/tmp/silver");
        assert_eq!(
            sink.path_for(Entity::Customers),
            PathBuf::from("/tmp/silver/crm_cust_info.csv")
        );
    }
}
