//! Storage abstraction traits
//!
//! The engine never touches storage directly. A refresh pulls each raw entity
//! set through a [`RawSource`] and hands the conformed set to a
//! [`ConformedSink`], which replaces the previous snapshot wholesale.

use crate::domain::{ConformedBatch, Entity, RawBatch, Result};
use async_trait::async_trait;

/// Bulk read interface for raw entity sets
#[async_trait]
pub trait RawSource: Send + Sync {
    /// Human-readable description of where raw data comes from
    fn describe(&self) -> String;

    /// Test that the source is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Fetch the complete raw set of one entity
    ///
    /// An entity with no rows yields an empty batch, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`](crate::domain::SourceError) if the set cannot
    /// be located or decoded.
    async fn fetch(&self, entity: Entity) -> Result<RawBatch>;
}

/// Full-replace write interface for conformed entity sets
#[async_trait]
pub trait ConformedSink: Send + Sync {
    /// Human-readable description of where conformed data goes
    fn describe(&self) -> String;

    /// Create whatever structure the sink needs before the first write
    ///
    /// Must be safe to call on every run.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError::SchemaFailed`](crate::domain::SinkError) if the
    /// structure cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Discard the previous snapshot of the batch's entity and store this one
    ///
    /// Either the whole batch becomes visible or the previous snapshot stays.
    ///
    /// # Returns
    ///
    /// The number of records written.
    async fn replace(&self, batch: &ConformedBatch) -> Result<usize>;
}

/// Full-replace write interface for the raw layer itself
///
/// Used to stage upstream extracts into relational storage before a refresh.
#[async_trait]
pub trait RawLoader: Send + Sync {
    /// Create the raw-layer structure if it does not exist yet
    async fn ensure_raw_schema(&self) -> Result<()>;

    /// Discard the previous raw snapshot of the batch's entity and store this one
    ///
    /// # Returns
    ///
    /// The number of records written.
    async fn replace_raw(&self, batch: &RawBatch) -> Result<usize>;
}
