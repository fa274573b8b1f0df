//! Logging and observability
//!
//! Structured logging with configurable levels, console output and optional
//! JSON files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use strata::logging::init_logging;
//! use strata::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(entity = "customers", "Refresh started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of one entity refresh
///
/// # Example
///
/// ```no_run
/// use strata::log_entity_start;
/// use strata::domain::Entity;
///
/// log_entity_start!(Entity::Customers);
/// ```
#[macro_export]
macro_rules! log_entity_start {
    ($entity:expr) => {
        tracing::info!(entity = %$entity, "Refreshing entity");
    };
}

/// Log the completion of one entity refresh
///
/// # Example
///
/// ```no_run
/// use strata::log_entity_complete;
/// use strata::domain::Entity;
/// use std::time::Duration;
///
/// log_entity_complete!(Entity::Sales, 60398, 60398, Duration::from_millis(840));
/// ```
#[macro_export]
macro_rules! log_entity_complete {
    ($entity:expr, $rows_read:expr, $rows_written:expr, $duration:expr) => {
        tracing::info!(
            entity = %$entity,
            rows_read = $rows_read,
            rows_written = $rows_written,
            duration_ms = $duration.as_millis() as u64,
            "Entity refreshed"
        );
    };
}
