//! External storage integrations for Strata.
//!
//! - [`storage`] - source/sink traits and the configuration-driven factory
//! - [`csv`] - directory of CSV files
//! - [`postgresql`] - pooled PostgreSQL with raw and conformed schemas
//! - [`memory`] - in-process store
//!
//! # Design Pattern
//!
//! Adapters isolate storage from the engine. A refresh only sees
//! [`RawSource`](storage::RawSource) and [`ConformedSink`](storage::ConformedSink)
//! trait objects, so tests swap in [`memory::MemoryStore`].
//!
//! ```rust,no_run
//! use strata::adapters::csv::{CsvSink, CsvSource};
//! use strata::adapters::storage::{ConformedSink, RawSource};
//! use strata::core::conform::{conform, ConformContext};
//! use strata::domain::Entity;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = CsvSource::new("data/raw");
//! let sink = CsvSink::new("data/conformed");
//!
//! let raw = source.fetch(Entity::Customers).await?;
//! let outcome = conform(raw, &ConformContext::today());
//! sink.ensure_schema().await?;
//! let written = sink.replace(&outcome.batch).await?;
//! println!("{written} customers written");
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod memory;
pub mod postgresql;
pub mod storage;
