//! Configuration management for Strata.
//!
//! Strata uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STRATA_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation of every section on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("strata.toml")?;
//!
//! println!("Source: {:?}", config.source.kind);
//! println!("Target: {:?}", config.target.kind);
//! println!("Entities: {:?}", config.refresh.entities);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry-run flag
//! - [`StorageConfig`] - `[source]` and `[target]` backends
//! - [`PostgreSQLConfig`] - pooled connection and schema names
//! - [`RefreshConfig`] - entity selection, concurrency, processing date
//! - [`LoggingConfig`] - local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [source]
//! kind = "postgresql"
//!
//! [target]
//! kind = "postgresql"
//!
//! [postgresql]
//! connection_string = "${STRATA_PG_URL}"
//! ssl_mode = "require"
//! raw_schema = "bronze"
//! conformed_schema = "silver"
//!
//! [refresh]
//! entities = ["customers", "products", "sales"]
//! max_concurrency = 3
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CsvConfig, Environment, LoggingConfig, PostgreSQLConfig, RefreshConfig,
    StorageConfig, StorageKind, StrataConfig,
};
pub use secret::{redact_connection_string, secret_string, SecretString, SecretValue};
