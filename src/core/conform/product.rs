//! Product conformer
//!
//! Splits the composite business key, recodes the product line and rebuilds a
//! validity history from start dates alone: within one product segment every
//! version ends the day before the next version starts, and the latest version
//! stays open.

use super::codes;
use super::stats::ConformStats;
use crate::domain::records::{Product, RawProduct};
use std::collections::BTreeMap;

const CATEGORY_SEGMENT_LEN: usize = 5;
const PRODUCT_SEGMENT_OFFSET: usize = 6;

/// Split a composite key into its category and product segments.
///
/// The category segment is the first five characters with `-` replaced by
/// `_`; the product segment is everything from the seventh character on.
pub fn split_business_key(key: &str) -> (String, String) {
    let category: String = key
        .chars()
        .take(CATEGORY_SEGMENT_LEN)
        .map(|c| if c == '-' { '_' } else { c })
        .collect();
    let product: String = key.chars().skip(PRODUCT_SEGMENT_OFFSET).collect();
    (category, product)
}

/// Conform the full raw product set.
///
/// Output is grouped by product segment and ordered by start date within a
/// group. Versions sharing a start date keep their input order, and the
/// earlier one ends the day before that shared date.
pub fn conform_products(raw: Vec<RawProduct>, stats: &mut ConformStats) -> Vec<Product> {
    stats.rows_read += raw.len();

    let mut versions: Vec<Product> = raw
        .into_iter()
        .map(|record| {
            let (category_id, key) = match record.key.as_deref().map(split_business_key) {
                Some((category, product)) => (Some(category), Some(product)),
                None => (None, None),
            };
            let line = codes::product_line(record.line.as_deref());
            stats.note_code(line);

            let cost = record.cost.unwrap_or(0);
            if cost < 0 {
                stats.negative_costs += 1;
            }

            Product {
                id: record.id,
                category_id,
                key,
                name: record.name,
                cost,
                line: line.to_string(),
                start_date: record.start_date,
                end_date: None,
            }
        })
        .collect();

    let mut segments: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
    for (index, version) in versions.iter().enumerate() {
        segments.entry(version.key.clone()).or_default().push(index);
    }

    let mut ordered = Vec::with_capacity(versions.len());
    for indices in segments.values_mut() {
        indices.sort_by_key(|&index| (versions[index].start_date, index));

        for pair in indices.windows(2) {
            let next_start = versions[pair[1]].start_date;
            versions[pair[0]].end_date = next_start.and_then(|start| start.pred_opt());
        }
        ordered.extend(indices.iter().copied());
    }

    let mut slots: Vec<Option<Product>> = versions.into_iter().map(Some).collect();
    let products: Vec<Product> = ordered
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();

    stats.rows_conformed += products.len();
    products
}
