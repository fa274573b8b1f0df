//! Customer demographic conformer

use super::codes;
use super::stats::ConformStats;
use crate::domain::records::{Demographic, RawDemographic};
use chrono::NaiveDate;

/// Literal prefix some upstream systems put in front of the customer key
pub const LEGACY_ID_PREFIX: &str = "NAS";

/// Remove one leading [`LEGACY_ID_PREFIX`], if present.
pub fn strip_legacy_prefix(id: String) -> String {
    if id.starts_with(LEGACY_ID_PREFIX) {
        id[LEGACY_ID_PREFIX.len()..].to_string()
    } else {
        id
    }
}

/// Conform the full raw demographic set. Input order is preserved.
///
/// Birth dates after `as_of` are impossible and become absent.
pub fn conform_demographics(
    raw: Vec<RawDemographic>,
    as_of: NaiveDate,
    stats: &mut ConformStats,
) -> Vec<Demographic> {
    stats.rows_read += raw.len();

    let demographics: Vec<Demographic> = raw
        .into_iter()
        .map(|record| {
            let birth_date = match record.birth_date {
                Some(date) if date > as_of => {
                    stats.dates_rejected += 1;
                    None
                }
                other => other,
            };
            let gender = codes::gender_with_long_form(record.gender.as_deref());
            stats.note_code(gender);

            Demographic {
                id: record.id.map(strip_legacy_prefix),
                birth_date,
                gender: gender.to_string(),
            }
        })
        .collect();

    stats.rows_conformed += demographics.len();
    demographics
}
