//! Raw source over a directory of CSV extracts

use crate::adapters::storage::traits::RawSource;
use crate::domain::{Entity, RawBatch, Result, SourceError, StrataError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Reads one extract file per entity from a directory
///
/// File names follow [`Entity::raw_file_name`]. Values are read verbatim;
/// whitespace is significant upstream data and is left for the engine.
pub struct CsvSource {
    directory: PathBuf,
}

impl CsvSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, entity: Entity) -> PathBuf {
        self.directory.join(entity.raw_file_name())
    }
}

/// Decode a whole extract. Any structurally broken row fails the entity.
pub(crate) fn decode_rows<T: DeserializeOwned>(entity: Entity, bytes: &[u8]) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| SourceError::MalformedRecord {
            entity,
            row: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Decode an extract into the raw batch for its entity
pub fn decode_raw_batch(entity: Entity, bytes: &[u8]) -> Result<RawBatch> {
    Ok(match entity {
        Entity::Customers => RawBatch::Customers(decode_rows(entity, bytes)?),
        Entity::Products => RawBatch::Products(decode_rows(entity, bytes)?),
        Entity::Sales => RawBatch::Sales(decode_rows(entity, bytes)?),
        Entity::Demographics => RawBatch::Demographics(decode_rows(entity, bytes)?),
        Entity::Locations => RawBatch::Locations(decode_rows(entity, bytes)?),
        Entity::Categories => RawBatch::Categories(decode_rows(entity, bytes)?),
    })
}

#[async_trait]
impl RawSource for CsvSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.directory.display())
    }

    async fn test_connection(&self) -> Result<()> {
        let metadata = tokio::fs::metadata(&self.directory).await.map_err(|e| {
            StrataError::Connection(format!(
                "Raw directory {} is not accessible: {}",
                self.directory.display(),
                e
            ))
        })?;

        if !metadata.is_dir() {
            return Err(StrataError::Connection(format!(
                "Raw directory {} is not a directory",
                self.directory.display()
            )));
        }
        Ok(())
    }

    async fn fetch(&self, entity: Entity) -> Result<RawBatch> {
        let path = self.path_for(entity);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound {
                    entity,
                    location: path.display().to_string(),
                }
                .into())
            }
            Err(e) => {
                return Err(SourceError::ReadFailed {
                    entity,
                    message: format!("{}: {}", path.display(), e),
                }
                .into())
            }
        };

        let batch = decode_raw_batch(entity, &bytes)?;
        tracing::debug!(
            entity = %entity,
            path = %path.display(),
            rows = batch.len(),
            "Read raw extract"
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CUSTOMERS: &str = "\
cst_id,cst_key,cst_firstname,cst_lastname,cst_marital_status,cst_gndr,cst_create_date
11000,AW00011000, Jon,Yang ,M,M,2025-10-06
,AW00011001,Eugene,Huang,S,M,2025-10-06
11002,AW00011002,Ruben,Torres,x,,not-a-date
";

    #[test]
    fn test_decode_keeps_whitespace_and_degrades_bad_values() {
        let batch = decode_raw_batch(Entity::Customers, CUSTOMERS.as_bytes()).unwrap();
        let RawBatch::Customers(rows) = batch else {
            panic!("wrong entity");
        };

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].first_name.as_deref(), Some(" Jon"));
        assert_eq!(rows[0].create_date, NaiveDate::from_ymd_opt(2025, 10, 6));
        assert_eq!(rows[1].id, None);
        assert_eq!(rows[2].gender, None);
        assert_eq!(rows[2].create_date, None);
    }

    #[test]
    fn test_decode_rejects_ragged_rows() {
        let input = "cid,cntry\nAW-1,DE\nAW-2,US,extra\n";
        let err = decode_raw_batch(Entity::Locations, input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StrataError::Source(SourceError::MalformedRecord {
                entity: Entity::Locations,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_header_only_is_empty() {
        let batch = decode_raw_batch(Entity::Categories, b"id,cat,subcat,maintenance\n").unwrap();
        assert!(batch.is_empty());
    }
}
