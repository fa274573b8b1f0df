//! Refresh summary and reporting

use crate::core::conform::ConformStats;
use crate::domain::{Entity, StrataError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of one entity refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    pub entity: Entity,

    /// Raw records read from the source
    pub rows_read: usize,

    /// Conformed records written (or that would be written, in dry-run mode)
    pub rows_written: usize,

    /// Wall time for fetch, conform and replace
    pub duration_ms: u64,

    /// SHA-256 of the conformed set
    pub checksum: String,

    /// Data-quality observations
    pub stats: ConformStats,
}

/// Summary of a refresh run
#[derive(Debug, Clone)]
pub struct RefreshSummary {
    /// Unique id of this run, attached to log lines
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,

    /// Processing date the engine ran with
    pub as_of: NaiveDate,

    /// Whether writes were skipped
    pub dry_run: bool,

    /// Whether a shutdown signal stopped the run early
    pub interrupted: bool,

    /// Completed entities, ordered by entity
    pub reports: Vec<EntityReport>,

    /// Entities never started because of a shutdown signal
    pub skipped: Vec<Entity>,

    /// Failures, one per failed entity
    pub errors: Vec<RefreshError>,

    pub duration: Duration,
}

impl RefreshSummary {
    pub fn new(as_of: NaiveDate, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            as_of,
            dry_run,
            interrupted: false,
            reports: Vec::new(),
            skipped: Vec::new(),
            errors: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a completed entity, keeping reports ordered by entity
    pub fn add_report(&mut self, report: EntityReport) {
        let position = self
            .reports
            .partition_point(|existing| existing.entity < report.entity);
        self.reports.insert(position, report);
    }

    pub fn add_error(&mut self, error: RefreshError) {
        self.errors.push(error);
    }

    /// Record an entity skipped because of a shutdown signal
    pub fn mark_skipped(&mut self, entity: Entity) {
        self.interrupted = true;
        self.skipped.push(entity);
        self.skipped.sort();
    }

    /// Report for one entity, if it completed
    pub fn report(&self, entity: Entity) -> Option<&EntityReport> {
        self.reports.iter().find(|report| report.entity == entity)
    }

    /// Check if every selected entity completed
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty() && !self.interrupted
    }

    pub fn total_rows_read(&self) -> usize {
        self.reports.iter().map(|report| report.rows_read).sum()
    }

    pub fn total_rows_written(&self) -> usize {
        self.reports.iter().map(|report| report.rows_written).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            as_of = %self.as_of,
            dry_run = self.dry_run,
            entities = self.reports.len(),
            rows_read = self.total_rows_read(),
            rows_written = self.total_rows_written(),
            duration_ms = self.duration.as_millis() as u64,
            "Refresh completed"
        );

        for report in &self.reports {
            if report.stats.has_degradations() {
                tracing::info!(
                    entity = %report.entity,
                    rows_excluded = report.stats.rows_excluded,
                    fallback_codes = report.stats.fallback_codes,
                    dates_rejected = report.stats.dates_rejected,
                    sales_recomputed = report.stats.sales_recomputed,
                    prices_backfilled = report.stats.prices_backfilled,
                    negative_costs = report.stats.negative_costs,
                    "Values degraded or repaired while conforming"
                );
            }
        }

        if self.interrupted {
            tracing::warn!(
                skipped = ?self.skipped,
                "Refresh interrupted before all entities started"
            );
        }

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Refresh completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    entity = ?error.entity,
                    error_type = ?error.error_type,
                    message = %error.message,
                    "Refresh error"
                );
            }
        }
    }
}

/// Type of refresh error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshErrorType {
    /// Storage unreachable
    Connection,
    /// Raw set could not be read
    Source,
    /// Conformed set could not be checksummed
    Serialization,
    /// Conformed set could not be written
    Sink,
    /// Configuration error
    Configuration,
    /// Unknown error
    Unknown,
}

impl RefreshErrorType {
    /// Classify a library error
    pub fn of(error: &StrataError) -> Self {
        match error {
            StrataError::Connection(_) => RefreshErrorType::Connection,
            StrataError::Source(_) => RefreshErrorType::Source,
            StrataError::Sink(_) | StrataError::Database(_) | StrataError::Io(_) => {
                RefreshErrorType::Sink
            }
            StrataError::Serialization(_) => RefreshErrorType::Serialization,
            StrataError::Configuration(_) => RefreshErrorType::Configuration,
            StrataError::Other(_) => RefreshErrorType::Unknown,
        }
    }
}

/// Refresh error with the entity it belongs to
#[derive(Debug, Clone)]
pub struct RefreshError {
    pub error_type: RefreshErrorType,

    pub message: String,

    /// Entity that failed; absent for run-level failures
    pub entity: Option<Entity>,
}

impl RefreshError {
    pub fn new(error_type: RefreshErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            entity: None,
        }
    }

    /// Build from a library error, classifying it
    pub fn from_error(entity: Entity, error: &StrataError) -> Self {
        Self::new(RefreshErrorType::of(error), error.to_string()).with_entity(entity)
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }
}
