//! PostgreSQL adapter implementing the storage traits
//!
//! Every replace runs `TRUNCATE` and the inserts inside one transaction, so a
//! failed write leaves the previous snapshot in place.

use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{insert_statement, raw_select_statement, TableRow};
use crate::adapters::storage::traits::{ConformedSink, RawLoader, RawSource};
use crate::domain::{ConformedBatch, Entity, RawBatch, Result, SinkError, SourceError};
use async_trait::async_trait;
use std::sync::Arc;

/// PostgreSQL implementation of the storage traits
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    async fn fetch_rows<T: TableRow>(&self, entity: Entity) -> Result<Vec<T>> {
        let sql = raw_select_statement::<T>(self.client.raw_schema(), entity.table_name());
        let conn = self.client.get_connection().await?;

        let rows = conn
            .query(sql.as_str(), &[])
            .await
            .map_err(|e| SourceError::ReadFailed {
                entity,
                message: e.to_string(),
            })?;

        rows.iter().map(|row| T::from_row(entity, row)).collect()
    }

    /// Truncate and refill one table in a single transaction
    async fn replace_rows<T: TableRow + Sync>(
        &self,
        entity: Entity,
        schema: &str,
        rows: &[T],
    ) -> Result<usize> {
        let table = entity.table_name();
        let write_failed = |e: tokio_postgres::Error| SinkError::WriteFailed {
            entity,
            message: e.to_string(),
        };

        let mut conn = self.client.get_connection().await?;
        let tx = conn.transaction().await.map_err(write_failed)?;

        tx.batch_execute(&self.client.statement_timeout_sql())
            .await
            .map_err(write_failed)?;

        tx.batch_execute(&format!("TRUNCATE TABLE {schema}.{table} RESTART IDENTITY"))
            .await
            .map_err(|e| SinkError::TruncateFailed {
                entity,
                message: e.to_string(),
            })?;

        let statement = tx
            .prepare_cached(&insert_statement::<T>(schema, table))
            .await
            .map_err(write_failed)?;

        let mut written = 0usize;
        for row in rows {
            written += tx
                .execute(&statement, &row.params())
                .await
                .map_err(write_failed)? as usize;
        }

        tx.commit().await.map_err(write_failed)?;

        tracing::debug!(
            entity = %entity,
            table = %format!("{schema}.{table}"),
            rows = written,
            "Replaced table contents"
        );
        Ok(written)
    }
}

#[async_trait]
impl RawSource for PostgreSQLAdapter {
    fn describe(&self) -> String {
        format!(
            "postgresql:{} (schema {})",
            self.client.connection_string_safe(),
            self.client.raw_schema()
        )
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn fetch(&self, entity: Entity) -> Result<RawBatch> {
        Ok(match entity {
            Entity::Customers => RawBatch::Customers(self.fetch_rows(entity).await?),
            Entity::Products => RawBatch::Products(self.fetch_rows(entity).await?),
            Entity::Sales => RawBatch::Sales(self.fetch_rows(entity).await?),
            Entity::Demographics => RawBatch::Demographics(self.fetch_rows(entity).await?),
            Entity::Locations => RawBatch::Locations(self.fetch_rows(entity).await?),
            Entity::Categories => RawBatch::Categories(self.fetch_rows(entity).await?),
        })
    }
}

#[async_trait]
impl ConformedSink for PostgreSQLAdapter {
    fn describe(&self) -> String {
        format!(
            "postgresql:{} (schema {})",
            self.client.connection_string_safe(),
            self.client.conformed_schema()
        )
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_conformed_schema().await
    }

    async fn replace(&self, batch: &ConformedBatch) -> Result<usize> {
        let entity = batch.entity();
        let schema = self.client.conformed_schema();
        match batch {
            ConformedBatch::Customers(rows) => self.replace_rows(entity, schema, rows).await,
            ConformedBatch::Products(rows) => self.replace_rows(entity, schema, rows).await,
            ConformedBatch::Sales(rows) => self.replace_rows(entity, schema, rows).await,
            ConformedBatch::Demographics(rows) => self.replace_rows(entity, schema, rows).await,
            ConformedBatch::Locations(rows) => self.replace_rows(entity, schema, rows).await,
            ConformedBatch::Categories(rows) => self.replace_rows(entity, schema, rows).await,
        }
    }
}

#[async_trait]
impl RawLoader for PostgreSQLAdapter {
    async fn ensure_raw_schema(&self) -> Result<()> {
        self.client.ensure_raw_schema().await
    }

    async fn replace_raw(&self, batch: &RawBatch) -> Result<usize> {
        let entity = batch.entity();
        let schema = self.client.raw_schema();
        match batch {
            RawBatch::Customers(rows) => self.replace_rows(entity, schema, rows).await,
            RawBatch::Products(rows) => self.replace_rows(entity, schema, rows).await,
            RawBatch::Sales(rows) => self.replace_rows(entity, schema, rows).await,
            RawBatch::Demographics(rows) => self.replace_rows(entity, schema, rows).await,
            RawBatch::Locations(rows) => self.replace_rows(entity, schema, rows).await,
            RawBatch::Categories(rows) => self.replace_rows(entity, schema, rows).await,
        }
    }
}
