//! Customer conformer
//!
//! Keeps the most recent version of every customer identity and normalizes its
//! names and codes. Records without an identity key are dropped.

use super::codes;
use super::stats::ConformStats;
use crate::domain::records::{Customer, RawCustomer};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Conform the full raw customer set.
///
/// Output is ordered by identity key. When two versions share the latest
/// creation date, the one that appears first in the input wins; a missing
/// creation date ranks below any present one.
pub fn conform_customers(raw: Vec<RawCustomer>, stats: &mut ConformStats) -> Vec<Customer> {
    stats.rows_read += raw.len();

    let mut latest: BTreeMap<i64, RawCustomer> = BTreeMap::new();
    for record in raw {
        let Some(id) = record.id else {
            stats.rows_excluded += 1;
            continue;
        };

        match latest.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                stats.duplicates_dropped += 1;
                if record.create_date > slot.get().create_date {
                    slot.insert(record);
                }
            }
        }
    }

    let customers: Vec<Customer> = latest
        .into_iter()
        .map(|(id, record)| {
            let marital_status = codes::marital_status(record.marital_status.as_deref());
            let gender = codes::gender(record.gender.as_deref());
            stats.note_code(marital_status);
            stats.note_code(gender);

            Customer {
                id,
                key: record.key,
                first_name: record.first_name.map(|name| name.trim().to_string()),
                last_name: record.last_name.map(|name| name.trim().to_string()),
                marital_status: marital_status.to_string(),
                gender: gender.to_string(),
                create_date: record.create_date,
            }
        })
        .collect();

    stats.rows_conformed += customers.len();
    customers
}
