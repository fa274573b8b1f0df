//! Storage factory
//!
//! Builds the raw source and conformed sink named by the configuration. When
//! both sides are PostgreSQL they share one connection pool.

use crate::adapters::csv::{CsvSink, CsvSource};
use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::adapters::storage::traits::{ConformedSink, RawLoader, RawSource};
use crate::config::schema::{StorageConfig, StorageKind, StrataConfig};
use crate::domain::{Result, StrataError};
use std::sync::Arc;

/// Source and sink for one refresh
pub struct Storage {
    pub source: Arc<dyn RawSource>,
    pub sink: Arc<dyn ConformedSink>,
}

fn csv_directory(side: &str, config: &StorageConfig) -> Result<std::path::PathBuf> {
    config
        .csv
        .as_ref()
        .map(|csv| csv.directory.clone())
        .ok_or_else(|| {
            StrataError::Configuration(format!(
                "{side}.csv configuration is required when {side}.kind = 'csv'"
            ))
        })
}

async fn postgresql_adapter(config: &StrataConfig) -> Result<Arc<PostgreSQLAdapter>> {
    let pg_config = config.postgresql.as_ref().ok_or_else(|| {
        StrataError::Configuration(
            "postgresql configuration is required when source or target kind = 'postgresql'"
                .to_string(),
        )
    })?;

    tracing::info!("Creating PostgreSQL client");
    let client = PostgreSQLClient::new(pg_config.clone()).await?;
    Ok(Arc::new(PostgreSQLAdapter::new(client)))
}

/// Create the raw source and conformed sink described by the configuration
///
/// # Errors
///
/// Returns an error if a required section is missing or a client cannot be
/// created.
pub async fn create_storage(config: &StrataConfig) -> Result<Storage> {
    let shared_pg = if config.uses_postgresql() {
        Some(postgresql_adapter(config).await?)
    } else {
        None
    };

    let source: Arc<dyn RawSource> = match (config.source.kind, &shared_pg) {
        (StorageKind::PostgreSQL, Some(adapter)) => adapter.clone(),
        (StorageKind::PostgreSQL, None) => postgresql_adapter(config).await?,
        (StorageKind::Csv, _) => {
            let directory = csv_directory("source", &config.source)?;
            tracing::info!(directory = %directory.display(), "Creating CSV source");
            Arc::new(CsvSource::new(directory))
        }
    };

    let sink: Arc<dyn ConformedSink> = match (config.target.kind, &shared_pg) {
        (StorageKind::PostgreSQL, Some(adapter)) => adapter.clone(),
        (StorageKind::PostgreSQL, None) => postgresql_adapter(config).await?,
        (StorageKind::Csv, _) => {
            let directory = csv_directory("target", &config.target)?;
            tracing::info!(directory = %directory.display(), "Creating CSV sink");
            Arc::new(CsvSink::new(directory))
        }
    };

    Ok(Storage { source, sink })
}

/// Create the raw-layer loader used by `load-raw`
///
/// Only a PostgreSQL raw layer can be loaded.
pub async fn create_raw_loader(config: &StrataConfig) -> Result<Arc<dyn RawLoader>> {
    if config.source.kind != StorageKind::PostgreSQL {
        return Err(StrataError::Configuration(
            "load-raw requires source.kind = 'postgresql'".to_string(),
        ));
    }
    let adapter: Arc<dyn RawLoader> = postgresql_adapter(config).await?;
    Ok(adapter)
}
