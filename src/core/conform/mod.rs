//! Rule-based conforming engine.
//!
//! Each entity has its own conformer: a pure transform from the full raw set
//! to the full conformed set. Conformers never fail. Malformed values degrade
//! to a local fallback (an absent date, the `n/a` sentinel) and every such
//! degradation is counted in [`ConformStats`].
//!
//! # Example
//!
//! ```rust
//! use strata::core::conform::{conform, ConformContext};
//! use strata::domain::{ConformedBatch, RawBatch, RawCustomer};
//!
//! let raw = RawBatch::Customers(vec![RawCustomer {
//!     id: Some(11000),
//!     marital_status: Some(" s ".to_string()),
//!     ..Default::default()
//! }]);
//!
//! let outcome = conform(raw, &ConformContext::default());
//! let ConformedBatch::Customers(customers) = outcome.batch else {
//!     unreachable!()
//! };
//! assert_eq!(customers[0].marital_status, "Single");
//! ```

pub mod category;
pub mod codes;
pub mod customer;
pub mod dates;
pub mod demographic;
pub mod location;
pub mod product;
pub mod sales;
pub mod stats;

pub use stats::ConformStats;

use crate::domain::{ConformedBatch, RawBatch};
use chrono::{NaiveDate, Utc};

/// Run-wide inputs shared by every conformer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConformContext {
    /// Processing date; birth dates after it are treated as impossible
    pub as_of: NaiveDate,
}

impl ConformContext {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Context pinned to the current UTC date
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

impl Default for ConformContext {
    fn default() -> Self {
        Self::today()
    }
}

/// Conformed set plus the observations collected while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct ConformOutcome {
    pub batch: ConformedBatch,
    pub stats: ConformStats,
}

/// Conform one raw entity set.
///
/// Deterministic for a given `raw` and `ctx`: applying it twice to the same
/// snapshot yields the same output.
pub fn conform(raw: RawBatch, ctx: &ConformContext) -> ConformOutcome {
    let entity = raw.entity();
    let mut stats = ConformStats::default();

    let batch = match raw {
        RawBatch::Customers(rows) => {
            ConformedBatch::Customers(customer::conform_customers(rows, &mut stats))
        }
        RawBatch::Products(rows) => {
            ConformedBatch::Products(product::conform_products(rows, &mut stats))
        }
        RawBatch::Sales(rows) => ConformedBatch::Sales(sales::conform_sales(rows, &mut stats)),
        RawBatch::Demographics(rows) => ConformedBatch::Demographics(
            demographic::conform_demographics(rows, ctx.as_of, &mut stats),
        ),
        RawBatch::Locations(rows) => {
            ConformedBatch::Locations(location::conform_locations(rows, &mut stats))
        }
        RawBatch::Categories(rows) => {
            ConformedBatch::Categories(category::conform_categories(rows, &mut stats))
        }
    };

    tracing::debug!(
        entity = %entity,
        rows_read = stats.rows_read,
        rows_conformed = stats.rows_conformed,
        rows_excluded = stats.rows_excluded,
        duplicates_dropped = stats.duplicates_dropped,
        fallback_codes = stats.fallback_codes,
        dates_rejected = stats.dates_rejected,
        "Conformed entity set"
    );

    if stats.negative_costs > 0 {
        tracing::warn!(
            entity = %entity,
            negative_costs = stats.negative_costs,
            "Negative product costs observed, kept unchanged"
        );
    }

    if stats.rows_excluded > 0 {
        tracing::debug!(
            entity = %entity,
            rows_excluded = stats.rows_excluded,
            "Records without identity key excluded"
        );
    }

    ConformOutcome { batch, stats }
}
