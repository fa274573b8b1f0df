//! Data-quality counters collected while conforming
//!
//! The counters are observations only. They never influence the output.

use crate::domain::NOT_AVAILABLE;
use serde::Serialize;

/// Per-entity data-quality observations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConformStats {
    /// Raw records read
    pub rows_read: usize,

    /// Conformed records produced
    pub rows_conformed: usize,

    /// Records excluded for a structural violation (null identity key)
    pub rows_excluded: usize,

    /// Older versions dropped by the recency pick
    pub duplicates_dropped: usize,

    /// Categorical values that fell back to `n/a`
    pub fallback_codes: usize,

    /// Date values that were present but resolved to absent
    pub dates_rejected: usize,

    /// Sales amounts replaced by `quantity * |price|`
    pub sales_recomputed: usize,

    /// Prices derived from `sales / quantity`
    pub prices_backfilled: usize,

    /// Raw product costs below zero, kept unchanged
    pub negative_costs: usize,
}

impl ConformStats {
    /// Count a recoded value if it is the fallback sentinel
    pub(crate) fn note_code(&mut self, value: &str) {
        if value == NOT_AVAILABLE {
            self.fallback_codes += 1;
        }
    }

    /// Whether any value was degraded or repaired
    pub fn has_degradations(&self) -> bool {
        self.rows_excluded
            + self.fallback_codes
            + self.dates_rejected
            + self.sales_recomputed
            + self.prices_backfilled
            + self.negative_costs
            > 0
    }
}
