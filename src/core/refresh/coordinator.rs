//! Refresh coordinator - runs the conforming engine over every selected entity
//!
//! Each entity is an independent unit of work: fetch the raw set, conform it,
//! replace the conformed set. Units run concurrently up to a configured limit
//! and a failure in one never stops the others.

use crate::adapters::storage::{create_storage, ConformedSink, RawSource};
use crate::config::StrataConfig;
use crate::core::conform::{conform, ConformContext};
use crate::core::refresh::checksum::batch_checksum;
use crate::core::refresh::summary::{
    EntityReport, RefreshError, RefreshErrorType, RefreshSummary,
};
use crate::domain::{Entity, Result, StrataError};
use crate::{log_entity_complete, log_entity_start};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Options for one refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Entities to refresh, in scheduling order
    pub entities: Vec<Entity>,

    /// Maximum number of entities processed at once
    pub max_concurrency: usize,

    /// Conform everything but skip writes
    pub dry_run: bool,

    /// Processing date; `None` means today (UTC)
    pub as_of: Option<NaiveDate>,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            entities: Entity::ALL.to_vec(),
            max_concurrency: 4,
            dry_run: false,
            as_of: None,
        }
    }
}

impl RefreshOptions {
    /// Options taken from the `[application]` and `[refresh]` sections
    pub fn from_config(config: &StrataConfig) -> Self {
        Self {
            entities: config.refresh.entities.clone(),
            max_concurrency: config.refresh.max_concurrency,
            dry_run: config.application.dry_run,
            as_of: config.refresh.as_of,
        }
    }

    fn context(&self) -> ConformContext {
        self.as_of.map(ConformContext::new).unwrap_or_default()
    }
}

/// How one scheduled entity ended
enum EntityRun {
    Completed(EntityReport),
    Failed(RefreshError),
    Skipped(Entity),
}

/// Refresh coordinator
pub struct RefreshCoordinator {
    source: Arc<dyn RawSource>,
    sink: Arc<dyn ConformedSink>,
    options: RefreshOptions,
    shutdown_signal: watch::Receiver<bool>,
}

impl RefreshCoordinator {
    /// Create a coordinator with the storage described by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the source or sink cannot be created.
    pub async fn new(config: &StrataConfig, shutdown_signal: watch::Receiver<bool>) -> Result<Self> {
        let storage = create_storage(config).await?;
        Ok(Self::with_storage(
            storage.source,
            storage.sink,
            RefreshOptions::from_config(config),
            shutdown_signal,
        ))
    }

    /// Create a coordinator over explicit storage
    pub fn with_storage(
        source: Arc<dyn RawSource>,
        sink: Arc<dyn ConformedSink>,
        options: RefreshOptions,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            sink,
            options,
            shutdown_signal,
        }
    }

    /// Check that the raw source is reachable
    pub async fn test_connection(&self) -> Result<()> {
        self.source.test_connection().await
    }

    /// Execute the refresh
    ///
    /// Prepares the sink, then for every selected entity:
    /// 1. Fetches the full raw set
    /// 2. Conforms it
    /// 3. Replaces the conformed set (skipped in dry-run mode)
    ///
    /// Per-entity failures are collected in the summary. A shutdown signal
    /// stops entities that have not started yet.
    ///
    /// # Errors
    ///
    /// Never fails for a single entity. Run-level failures (the sink schema
    /// cannot be prepared) are recorded in the summary as well.
    pub async fn execute_refresh(&self) -> Result<RefreshSummary> {
        let start_time = Instant::now();
        let ctx = self.options.context();
        let mut summary = RefreshSummary::new(ctx.as_of, self.options.dry_run);

        tracing::info!(
            run_id = %summary.run_id,
            source = %self.source.describe(),
            target = %self.sink.describe(),
            entities = ?self.options.entities,
            as_of = %ctx.as_of,
            dry_run = self.options.dry_run,
            "Starting refresh"
        );

        if self.options.dry_run {
            tracing::info!("Dry run: conformed sets will not be written");
        } else if let Err(e) = self.sink.ensure_schema().await {
            tracing::error!(error = %e, "Failed to prepare conformed target");
            summary.add_error(RefreshError::new(
                RefreshErrorType::of(&e),
                format!("Failed to prepare conformed target: {e}"),
            ));
            summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let concurrency = self.options.max_concurrency.max(1);
        let runs: Vec<EntityRun> = stream::iter(self.options.entities.iter().copied())
            .map(|entity| self.run_entity(entity, &ctx))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        for run in runs {
            match run {
                EntityRun::Completed(report) => summary.add_report(report),
                EntityRun::Failed(error) => summary.add_error(error),
                EntityRun::Skipped(entity) => summary.mark_skipped(entity),
            }
        }

        summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }

    async fn run_entity(&self, entity: Entity, ctx: &ConformContext) -> EntityRun {
        if *self.shutdown_signal.borrow() {
            tracing::info!(entity = %entity, "Shutdown requested, entity not started");
            return EntityRun::Skipped(entity);
        }

        match self.refresh_entity(entity, ctx).await {
            Ok(report) => EntityRun::Completed(report),
            Err(e) => {
                tracing::error!(entity = %entity, error = %e, "Entity refresh failed");
                EntityRun::Failed(RefreshError::from_error(entity, &e))
            }
        }
    }

    /// Fetch, conform and replace one entity
    async fn refresh_entity(&self, entity: Entity, ctx: &ConformContext) -> Result<EntityReport> {
        let start_time = Instant::now();
        log_entity_start!(entity);

        let raw = self.source.fetch(entity).await?;
        if raw.entity() != entity {
            return Err(StrataError::Other(format!(
                "source returned {} rows when {entity} was requested",
                raw.entity()
            )));
        }

        let rows_read = raw.len();
        if rows_read == 0 {
            tracing::warn!(entity = %entity, "Raw set is empty");
        }

        let outcome = conform(raw, ctx);
        let checksum = batch_checksum(&outcome.batch)?;

        let rows_written = if self.options.dry_run {
            outcome.batch.len()
        } else {
            self.sink.replace(&outcome.batch).await?
        };

        let duration = start_time.elapsed();
        log_entity_complete!(entity, rows_read, rows_written, duration);

        Ok(EntityReport {
            entity,
            rows_read,
            rows_written,
            duration_ms: duration.as_millis() as u64,
            checksum,
            stats: outcome.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::{RawBatch, RawCategory, RawLocation};

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_raw([
            RawBatch::Locations(vec![RawLocation {
                id: Some("AW-00011000".to_string()),
                country: Some("DE".to_string()),
            }]),
            RawBatch::Categories(vec![RawCategory {
                id: Some("AC_BR".to_string()),
                category: Some("Accessories".to_string()),
                subcategory: Some("Bike Racks".to_string()),
                maintenance: Some("Yes".to_string()),
            }]),
        ]))
    }

    fn options(entities: Vec<Entity>, dry_run: bool) -> RefreshOptions {
        RefreshOptions {
            entities,
            max_concurrency: 2,
            dry_run,
            as_of: NaiveDate::from_ymd_opt(2025, 1, 1),
        }
    }

    fn coordinator(store: &Arc<MemoryStore>, options: RefreshOptions) -> RefreshCoordinator {
        let (_tx, rx) = watch::channel(false);
        RefreshCoordinator::with_storage(store.clone(), store.clone(), options, rx)
    }

    #[tokio::test]
    async fn test_refresh_writes_selected_entities() {
        let store = store();
        let coordinator = coordinator(
            &store,
            options(vec![Entity::Locations, Entity::Categories], false),
        );

        let summary = coordinator.execute_refresh().await.unwrap();

        assert!(summary.is_successful());
        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.report(Entity::Locations).unwrap().rows_written, 1);
        assert!(store.conformed(Entity::Locations).is_some());
        assert!(store.conformed(Entity::Customers).is_none());
    }

    #[tokio::test]
    async fn test_dry_run_skips_writes() {
        let store = store();
        let coordinator = coordinator(&store, options(vec![Entity::Locations], true));

        let summary = coordinator.execute_refresh().await.unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.report(Entity::Locations).unwrap().rows_written, 1);
        assert!(store.conformed(Entity::Locations).is_none());
        assert_eq!(store.replace_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_raw_set_is_not_an_error() {
        let store = store();
        let coordinator = coordinator(&store, options(vec![Entity::Sales], false));

        let summary = coordinator.execute_refresh().await.unwrap();

        assert!(summary.is_successful());
        let report = summary.report(Entity::Sales).unwrap();
        assert_eq!(report.rows_read, 0);
        assert_eq!(report.rows_written, 0);
    }

    #[tokio::test]
    async fn test_shutdown_before_start_skips_all() {
        let store = store();
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();
        let coordinator = RefreshCoordinator::with_storage(
            store.clone(),
            store.clone(),
            options(vec![Entity::Locations, Entity::Categories], false),
            rx,
        );

        let summary = coordinator.execute_refresh().await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.skipped, vec![Entity::Locations, Entity::Categories]);
        assert!(summary.reports.is_empty());
        assert_eq!(store.replace_count(), 0);
    }

    #[test]
    fn test_options_default_to_all_entities() {
        let options = RefreshOptions::default();
        assert_eq!(options.entities, Entity::ALL.to_vec());
        assert!(!options.dry_run);
        assert!(options.as_of.is_none());
    }
}
