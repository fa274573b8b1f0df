//! Shared categorical sentinel

/// Value used for any categorical field that cannot be classified.
pub const NOT_AVAILABLE: &str = "n/a";
