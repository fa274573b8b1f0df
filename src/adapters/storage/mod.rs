//! Storage abstraction layer
//!
//! Trait-based read and replace interfaces, plus the factory that picks
//! implementations from configuration.

pub mod factory;
pub mod traits;

pub use factory::{create_raw_loader, create_storage, Storage};
pub use traits::{ConformedSink, RawLoader, RawSource};
