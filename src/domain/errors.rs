//! Domain error types
//!
//! This module defines the error hierarchy for Strata. The conforming engine
//! itself never fails: malformed fields degrade to fallback values. Errors only
//! originate from the collaborators around it (configuration, raw sources,
//! conformed sinks) and never expose third-party types.

use crate::domain::entity::Entity;
use thiserror::Error;

/// Main Strata error type
#[derive(Debug, Error)]
pub enum StrataError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Raw source read failures
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Conformed sink write failures
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Database-related errors (generic)
    #[error("Database error: {0}")]
    Database(String),

    /// Network/connection errors
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while bulk-reading a raw entity set
#[derive(Debug, Error)]
pub enum SourceError {
    /// The raw set for the entity does not exist at the source
    #[error("Raw set for {entity} not found: {location}")]
    NotFound { entity: Entity, location: String },

    /// A raw record could not be decoded
    #[error("Malformed raw record in {entity} at row {row}: {message}")]
    MalformedRecord {
        entity: Entity,
        row: u64,
        message: String,
    },

    /// The bulk read failed
    #[error("Failed to read {entity}: {message}")]
    ReadFailed { entity: Entity, message: String },
}

/// Errors raised while replacing a conformed entity set
#[derive(Debug, Error)]
pub enum SinkError {
    /// The target schema could not be created
    #[error("Failed to prepare target schema: {0}")]
    SchemaFailed(String),

    /// Truncating the previous snapshot failed
    #[error("Failed to truncate {entity}: {message}")]
    TruncateFailed { entity: Entity, message: String },

    /// Inserting the new snapshot failed
    #[error("Failed to write {entity}: {message}")]
    WriteFailed { entity: Entity, message: String },

    /// The target does not support this operation
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl From<std::io::Error> for StrataError {
    fn from(err: std::io::Error) -> Self {
        StrataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StrataError {
    fn from(err: serde_json::Error) -> Self {
        StrataError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StrataError {
    fn from(err: toml::de::Error) -> Self {
        StrataError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for StrataError {
    fn from(err: csv::Error) -> Self {
        StrataError::Serialization(format!("CSV error: {err}"))
    }
}
