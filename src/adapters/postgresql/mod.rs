//! PostgreSQL storage
//!
//! Reads the raw schema, replaces tables in the conformed schema and stages
//! raw extracts for `load-raw`.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use models::TableRow;
