//! Parse result structure shared by all file parsers.

use crate::app::models::{MeasurementRecord, PipelineError};

/// Result of parsing one measurement file
///
/// Both sequences preserve source line order. A line contributes to exactly
/// one of the two: a fully parsed record, or a single error for its first
/// failing field.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Successfully parsed records
    pub records: Vec<MeasurementRecord>,

    /// Per-line parse errors (plus the file-level empty-input error when the
    /// header is missing)
    pub errors: Vec<PipelineError>,
}

impl ParseOutcome {
    /// Outcome holding a single fatal error and no records
    pub fn fatal(error: PipelineError) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![error],
        }
    }

    /// Whether any line failed to parse
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
