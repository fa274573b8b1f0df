//! Domain models and types for Strata.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity sets** ([`Entity`]) naming the six record families
//! - **Record types** for the raw and the conformed side of each entity
//! - **Whole-set batches** ([`RawBatch`], [`ConformedBatch`]) exchanged with storage
//! - **The shared fallback sentinel** ([`NOT_AVAILABLE`])
//! - **Error types** ([`StrataError`], [`SourceError`], [`SinkError`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, StrataError>`]:
//!
//! ```rust
//! use strata::domain::{Result, StrataError};
//!
//! fn example() -> Result<()> {
//!     Err(StrataError::Configuration("missing [source] section".to_string()))
//! }
//! ```

pub mod batch;
pub mod codes;
pub mod entity;
pub mod errors;
pub mod records;
pub mod result;

pub use batch::{ConformedBatch, RawBatch};
pub use codes::NOT_AVAILABLE;
pub use entity::{parse_entity_list, Entity};
pub use errors::{SinkError, SourceError, StrataError};
pub use records::{
    Category, Customer, Demographic, Location, Product, RawCategory, RawCustomer,
    RawDemographic, RawLocation, RawProduct, RawSalesOrder, SalesOrder,
};
pub use result::Result;
