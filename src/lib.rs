// Strata - Rule-based conforming engine for CRM/ERP extracts
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

//! # Strata - Raw-to-Conformed Cleansing Engine
//!
//! Strata turns raw CRM and ERP extracts (customers, products, sales orders,
//! demographics, locations, product categories) into conformed entity sets
//! ready for dimensional modeling.
//!
//! ## Overview
//!
//! This library provides:
//! - **Conforming** raw records with deterministic, rule-based cleansing
//! - **Reading** raw entity sets from CSV extracts or a PostgreSQL raw schema
//! - **Replacing** conformed sets in CSV files or a PostgreSQL conformed schema
//! - **Reporting** per-entity counts, checksums and data-quality observations
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The conforming engine and refresh orchestration
//! - [`adapters`] - Storage integrations (CSV, PostgreSQL, in-memory)
//! - [`domain`] - Entities, raw and conformed records, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strata::config::load_config;
//! use strata::core::refresh::RefreshCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("strata.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = RefreshCoordinator::new(&config, shutdown_rx).await?;
//!
//!     let summary = coordinator.execute_refresh().await?;
//!     println!("Wrote {} conformed rows", summary.total_rows_written());
//!     Ok(())
//! }
//! ```
//!
//! ## The Engine Alone
//!
//! The conformers are pure functions over whole entity sets and need no
//! storage at all:
//!
//! ```rust
//! use strata::core::conform::{conform, ConformContext};
//! use strata::domain::{ConformedBatch, RawBatch, RawLocation};
//!
//! let raw = RawBatch::Locations(vec![RawLocation {
//!     id: Some("AW-00011000".to_string()),
//!     country: Some("DE".to_string()),
//! }]);
//!
//! let outcome = conform(raw, &ConformContext::default());
//! let ConformedBatch::Locations(locations) = outcome.batch else {
//!     unreachable!()
//! };
//! assert_eq!(locations[0].id.as_deref(), Some("AW00011000"));
//! assert_eq!(locations[0].country, "Germany");
//! ```
//!
//! ## Error Handling
//!
//! Conforming never fails. Storage and configuration failures surface as
//! [`domain::StrataError`]:
//!
//! ```rust,no_run
//! use strata::domain::StrataError;
//!
//! fn example() -> Result<(), StrataError> {
//!     let config = strata::config::load_config("strata.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
