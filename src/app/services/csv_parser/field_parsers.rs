//! Field parsing utilities for delimited measurement records
//!
//! This module provides helper functions for interpreting the trimmed text
//! of individual fields: the fixed UTC timestamp grammar and
//! culture-invariant floating point numbers.

use crate::constants::{MAX_FRACTION_DIGITS, TIMESTAMP_FORMAT_COLON, TIMESTAMP_FORMAT_HYPHEN};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp literal against the recognized grammar
///
/// The grammar is `yyyy-MM-ddTHH[:|-]mm[:|-]ss[.f{1,7}]Z`: colon or hyphen
/// time separators (not mixed), zero to seven fractional-second digits, and
/// a mandatory literal `Z` suffix. Every numeric field is fixed width, so
/// unpadded components like `2023-1-01` do not match. Matching values are
/// interpreted as UTC; no other zone designator is recognized.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let body = raw.strip_suffix('Z')?;

    let (base, nanos) = match body.split_once('.') {
        Some((base, fraction)) => (base, parse_fraction_nanos(fraction)?),
        None => (body, 0),
    };

    // chrono accepts unpadded numeric fields; the grammar does not
    if !has_fixed_width_shape(base) {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(base, TIMESTAMP_FORMAT_COLON)
        .or_else(|_| NaiveDateTime::parse_from_str(base, TIMESTAMP_FORMAT_HYPHEN))
        .ok()?;

    let with_fraction = naive.checked_add_signed(chrono::Duration::nanoseconds(nanos))?;
    Some(with_fraction.and_utc())
}

/// Check the fixed-width shape `dddd-dd-ddTdd?dd?dd` (date/time components
/// zero-padded to two digits, year to four)
///
/// The time separators at positions 13 and 16 may each be `:` or `-`;
/// mixed pairs are ruled out later by the two base formats.
fn has_fixed_width_shape(base: &str) -> bool {
    let bytes = base.as_bytes();
    if bytes.len() != 19 {
        return false;
    }

    bytes.iter().enumerate().all(|(index, &byte)| match index {
        4 | 7 => byte == b'-',
        10 => byte == b'T',
        13 | 16 => byte == b':' || byte == b'-',
        _ => byte.is_ascii_digit(),
    })
}

/// Convert a fractional-second digit run (1-7 digits) to nanoseconds
fn parse_fraction_nanos(fraction: &str) -> Option<i64> {
    if fraction.is_empty() || fraction.len() > MAX_FRACTION_DIGITS {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits: i64 = fraction.parse().ok()?;
    let scale = 10_i64.pow((9 - fraction.len()) as u32);
    Some(digits * scale)
}

/// Parse a culture-invariant floating point field
///
/// Accepts optional sign, decimal point and exponent notation; no grouping
/// separators or locale-specific forms.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok()
}
