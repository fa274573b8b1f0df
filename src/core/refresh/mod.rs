//! Refresh orchestration
//!
//! Pulls every selected raw entity set through the conforming engine and
//! publishes the result, collecting a per-entity report.

pub mod checksum;
pub mod coordinator;
pub mod summary;

pub use coordinator::{RefreshCoordinator, RefreshOptions};
pub use summary::{EntityReport, RefreshError, RefreshErrorType, RefreshSummary};
