//! Core CSV measurement parser implementation
//!
//! Reads the decoded file text line by line, discards the header, and
//! splits each data line on its first two field separators without
//! allocating intermediate field vectors.

use super::field_parsers::{parse_float, parse_timestamp};
use super::outcome::ParseOutcome;
use crate::app::models::{MeasurementRecord, PipelineError};
use crate::app::services::registry::FileParser;
use crate::constants::FIELD_SEPARATOR;
use tracing::debug;

/// Parser for `.csv` measurement files
///
/// Expected line shape after the header: `timestamp;execution_time;value`.
/// Data fields must not themselves contain the separator; everything after
/// the second separator belongs to the value field.
#[derive(Debug, Clone, Copy)]
pub struct CsvMeasurementParser;

impl FileParser for CsvMeasurementParser {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &[".csv"]
    }

    fn parse(&self, text: &str, file_identity: &str) -> ParseOutcome {
        let mut lines = text.lines();

        // Line 1 is unconditionally the header; its content is never
        // validated, only its presence.
        match lines.next() {
            Some(header) if !header.trim().is_empty() => {}
            _ => {
                return ParseOutcome::fatal(PipelineError::empty_input(
                    "file is empty (missing header)",
                ));
            }
        }

        let mut outcome = ParseOutcome::default();
        let mut line_number = 1;

        for line in lines {
            line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line, line_number, file_identity) {
                Ok(record) => outcome.records.push(record),
                Err(error) => outcome.errors.push(error),
            }
        }

        debug!(
            "Parsed '{}': {} records, {} parse errors",
            file_identity,
            outcome.records.len(),
            outcome.errors.len()
        );

        outcome
    }
}

/// Parse one data line into a record, or the error for its first failing
/// field
///
/// The split locates the first two separator positions and slices around
/// them; fields after the first failure are not re-validated.
fn parse_line(
    line: &str,
    line_number: usize,
    file_identity: &str,
) -> Result<MeasurementRecord, PipelineError> {
    let Some(first) = line.find(FIELD_SEPARATOR) else {
        return Err(PipelineError::parse(
            line_number,
            "malformed line (missing field separator)",
        ));
    };

    let rest = &line[first + 1..];
    let Some(second) = rest.find(FIELD_SEPARATOR) else {
        return Err(PipelineError::parse(
            line_number,
            "malformed line (missing second field separator)",
        ));
    };

    let timestamp_part = line[..first].trim();
    let execution_part = rest[..second].trim();
    let value_part = rest[second + 1..].trim();

    let timestamp = parse_timestamp(timestamp_part).ok_or_else(|| {
        PipelineError::parse(
            line_number,
            format!("invalid timestamp '{timestamp_part}'"),
        )
    })?;

    let execution_time = parse_float(execution_part).ok_or_else(|| {
        PipelineError::parse(
            line_number,
            format!("invalid execution time '{execution_part}'"),
        )
    })?;

    let value = parse_float(value_part)
        .ok_or_else(|| PipelineError::parse(line_number, format!("invalid value '{value_part}'")))?;

    Ok(MeasurementRecord {
        file_identity: file_identity.to_string(),
        timestamp,
        execution_time,
        value,
        line_number,
    })
}
