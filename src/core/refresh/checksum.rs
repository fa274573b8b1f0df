//! Checksums of conformed sets
//!
//! Two runs over the same raw snapshot must publish byte-identical conformed
//! sets. The checksum makes that comparable across runs without keeping the
//! previous output around.

use crate::domain::{ConformedBatch, Result, StrataError};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 over the JSON serialization of `data`
///
/// Struct fields serialize in declaration order, so the encoding is stable
/// for a given record type.
///
/// # Examples
///
/// ```
/// use strata::core::refresh::checksum::calculate_checksum;
///
/// let checksum = calculate_checksum(&vec!["n/a", "Single"]).unwrap();
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let bytes =
        serde_json::to_vec(data).map_err(|e| StrataError::Serialization(e.to_string()))?;
    Ok(calculate_checksum_bytes(&bytes))
}

/// Hex-encoded SHA-256 of raw bytes
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Checksum of a whole conformed batch, rows in output order
pub fn batch_checksum(batch: &ConformedBatch) -> Result<String> {
    match batch {
        ConformedBatch::Customers(rows) => calculate_checksum(rows),
        ConformedBatch::Products(rows) => calculate_checksum(rows),
        ConformedBatch::Sales(rows) => calculate_checksum(rows),
        ConformedBatch::Demographics(rows) => calculate_checksum(rows),
        ConformedBatch::Locations(rows) => calculate_checksum(rows),
        ConformedBatch::Categories(rows) => calculate_checksum(rows),
    }
}
