//! Core business logic for Strata.
//!
//! # Modules
//!
//! - [`conform`] - The rule-based conforming engine, one pure conformer per entity
//! - [`refresh`] - Refresh orchestration, checksums and run summaries
//!
//! # Refresh Workflow
//!
//! 1. **Prepare**: Create the conformed schema if needed
//! 2. **Fetch**: Bulk-read each selected raw entity set
//! 3. **Conform**: Apply the cleansing and standardization rules
//! 4. **Replace**: Swap the previous conformed snapshot for the new one
//! 5. **Report**: Per-entity counts, checksums and data-quality observations
//!
//! # Example
//!
//! ```rust,no_run
//! use strata::config::load_config;
//! use strata::core::refresh::RefreshCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("strata.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = RefreshCoordinator::new(&config, shutdown_rx).await?;
//!
//! let summary = coordinator.execute_refresh().await?;
//! for report in &summary.reports {
//!     println!("{}: {} -> {}", report.entity, report.rows_read, report.rows_written);
//! }
//! # Ok(())
//! # }
//! ```

pub mod conform;
pub mod refresh;
