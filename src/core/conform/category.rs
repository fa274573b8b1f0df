//! Product category conformer
//!
//! Categories are already clean upstream; the set is carried over unchanged.

use super::stats::ConformStats;
use crate::domain::records::{Category, RawCategory};

/// Identity transform over the raw category set.
pub fn conform_categories(raw: Vec<RawCategory>, stats: &mut ConformStats) -> Vec<Category> {
    stats.rows_read += raw.len();
    stats.rows_conformed += raw.len();
    raw
}
