//! Line-oriented parser for `;`-delimited measurement files
//!
//! Turns raw file text into typed [`MeasurementRecord`]s plus per-line
//! parse errors. The first line is always treated as a header and discarded
//! without validation; each subsequent non-blank line is split on its first
//! two separators only, so single bad lines never abort the whole file.
//!
//! ## Architecture
//!
//! - [`parser`] - The [`CsvMeasurementParser`] line loop and field split
//! - [`field_parsers`] - Timestamp grammar and invariant float parsing
//! - [`outcome`] - The records-plus-errors result structure
//!
//! [`MeasurementRecord`]: crate::app::models::MeasurementRecord

pub mod field_parsers;
pub mod outcome;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use outcome::ParseOutcome;
pub use parser::CsvMeasurementParser;
