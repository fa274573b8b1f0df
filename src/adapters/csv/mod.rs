//! File-backed storage
//!
//! Raw extracts are read from one directory and conformed sets are written to
//! another, one CSV file per entity.

pub mod sink;
pub mod source;

pub use sink::CsvSink;
pub use source::CsvSource;
