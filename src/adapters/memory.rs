//! In-process storage
//!
//! Holds raw and conformed snapshots in memory. Useful for tests and for
//! embedding the engine where the caller already has the records at hand.

use crate::adapters::storage::traits::{ConformedSink, RawLoader, RawSource};
use crate::domain::{ConformedBatch, Entity, RawBatch, Result, StrataError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory raw source and conformed sink
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<HashMap<Entity, RawBatch>>,
    conformed: Mutex<HashMap<Entity, ConformedBatch>>,
    replace_count: Mutex<usize>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StrataError::Other("memory store lock poisoned".to_string()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw batches
    pub fn with_raw(batches: impl IntoIterator<Item = RawBatch>) -> Self {
        let store = Self::new();
        if let Ok(mut raw) = store.raw.lock() {
            for batch in batches {
                raw.insert(batch.entity(), batch);
            }
        }
        store
    }

    /// Current conformed snapshot of an entity, if one was written
    pub fn conformed(&self, entity: Entity) -> Option<ConformedBatch> {
        self.conformed
            .lock()
            .ok()
            .and_then(|conformed| conformed.get(&entity).cloned())
    }

    /// Current raw snapshot of an entity, if one was loaded
    pub fn raw(&self, entity: Entity) -> Option<RawBatch> {
        self.raw
            .lock()
            .ok()
            .and_then(|raw| raw.get(&entity).cloned())
    }

    /// Number of successful `replace` calls
    pub fn replace_count(&self) -> usize {
        self.replace_count.lock().map(|count| *count).unwrap_or(0)
    }
}

#[async_trait]
impl RawSource for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn fetch(&self, entity: Entity) -> Result<RawBatch> {
        let raw = lock(&self.raw)?;
        Ok(raw
            .get(&entity)
            .cloned()
            .unwrap_or_else(|| RawBatch::empty(entity)))
    }
}

#[async_trait]
impl ConformedSink for MemoryStore {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn replace(&self, batch: &ConformedBatch) -> Result<usize> {
        lock(&self.conformed)?.insert(batch.entity(), batch.clone());
        *lock(&self.replace_count)? += 1;
        Ok(batch.len())
    }
}

#[async_trait]
impl RawLoader for MemoryStore {
    async fn ensure_raw_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn replace_raw(&self, batch: &RawBatch) -> Result<usize> {
        lock(&self.raw)?.insert(batch.entity(), batch.clone());
        Ok(batch.len())
    }
}
