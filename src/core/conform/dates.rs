//! Integer-encoded calendar dates

use chrono::NaiveDate;

/// Decode a `YYYYMMDD` integer.
///
/// Returns `None` for zero, for anything that is not exactly eight decimal
/// digits, and for eight-digit values that are not a real calendar date.
pub fn decode_yyyymmdd(value: i64) -> Option<NaiveDate> {
    if !(10_000_000..=99_999_999).contains(&value) {
        return None;
    }

    let year = i32::try_from(value / 10_000).ok()?;
    let month = u32::try_from(value / 100 % 100).ok()?;
    let day = u32::try_from(value % 100).ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
