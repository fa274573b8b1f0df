//! Sales order conformer
//!
//! Decodes the integer-encoded dates and reconciles the amount, quantity and
//! price columns.

use super::dates::decode_yyyymmdd;
use super::stats::ConformStats;
use crate::domain::records::{RawSalesOrder, SalesOrder};

/// Corrected sales amount and unit price for one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub sales: Option<i64>,
    pub price: Option<i64>,
}

/// Reconcile amount and price from the original raw values.
///
/// Both corrections read the raw tuple only; the recomputed amount is never
/// fed into the price backfill.
///
/// - The amount is replaced by `quantity * |price|` when it is missing,
///   non-positive, or disagrees with that product. A disagreement can only be
///   detected when quantity and price are both present.
/// - The price is replaced by `sales / quantity` (integer division) when it is
///   missing or non-positive. A zero or missing quantity yields no price.
pub fn reconcile(sales: Option<i64>, quantity: Option<i64>, price: Option<i64>) -> Reconciled {
    let expected = quantity
        .zip(price)
        .and_then(|(quantity, price)| price.checked_abs().and_then(|p| quantity.checked_mul(p)));

    let amount_is_wrong = match sales {
        None => true,
        Some(amount) if amount <= 0 => true,
        Some(amount) => expected.is_some_and(|e| e != amount),
    };

    let price_is_wrong = !matches!(price, Some(p) if p > 0);

    Reconciled {
        sales: if amount_is_wrong { expected } else { sales },
        price: if price_is_wrong {
            match (sales, quantity) {
                (Some(amount), Some(quantity)) if quantity != 0 => amount.checked_div(quantity),
                _ => None,
            }
        } else {
            price
        },
    }
}

fn decode_date(value: Option<i64>, stats: &mut ConformStats) -> Option<chrono::NaiveDate> {
    let value = value?;
    let decoded = decode_yyyymmdd(value);
    if decoded.is_none() {
        stats.dates_rejected += 1;
    }
    decoded
}

/// Conform the full raw sales set. Input order is preserved.
pub fn conform_sales(raw: Vec<RawSalesOrder>, stats: &mut ConformStats) -> Vec<SalesOrder> {
    stats.rows_read += raw.len();

    let orders: Vec<SalesOrder> = raw
        .into_iter()
        .map(|record| {
            let reconciled = reconcile(record.sales, record.quantity, record.price);
            if reconciled.sales != record.sales {
                stats.sales_recomputed += 1;
            }
            if reconciled.price != record.price {
                stats.prices_backfilled += 1;
            }

            SalesOrder {
                order_number: record.order_number,
                product_key: record.product_key,
                customer_id: record.customer_id,
                order_date: decode_date(record.order_date, stats),
                ship_date: decode_date(record.ship_date, stats),
                due_date: decode_date(record.due_date, stats),
                sales: reconciled.sales,
                quantity: record.quantity,
                price: reconciled.price,
            }
        })
        .collect();

    stats.rows_conformed += orders.len();
    orders
}
