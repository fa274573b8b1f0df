//! Customer location conformer

use super::codes;
use super::stats::ConformStats;
use crate::domain::records::{Location, RawLocation};

/// Conform the full raw location set. Input order is preserved.
pub fn conform_locations(raw: Vec<RawLocation>, stats: &mut ConformStats) -> Vec<Location> {
    stats.rows_read += raw.len();

    let locations: Vec<Location> = raw
        .into_iter()
        .map(|record| {
            let country = codes::country(record.country.as_deref());
            stats.note_code(&country);

            Location {
                id: record.id.map(|id| id.replace('-', "")),
                country,
            }
        })
        .collect();

    stats.rows_conformed += locations.len();
    locations
}
