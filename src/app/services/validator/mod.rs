//! Business validation for uploaded measurement files
//!
//! Three independently callable checks: file admissibility (runs before
//! parsing), exhaustive per-record validation, and the row-count policy
//! (only meaningful once per-line and per-record errors are known to be
//! empty). All thresholds come from an immutable [`ValidationConfig`]
//! captured at construction.

use crate::app::models::{FileUpload, MeasurementRecord, PipelineError};
use crate::config::ValidationConfig;
use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Validator for upload admissibility, record constraints and row counts
#[derive(Debug, Clone)]
pub struct ValueValidator {
    config: ValidationConfig,
    min_allowed_date: DateTime<Utc>,
}

impl ValueValidator {
    /// Create a validator, precomputing the timestamp range lower bound
    /// (January 1 of the configured minimum year, UTC)
    pub fn new(config: ValidationConfig) -> Result<Self> {
        config.validate()?;

        let min_allowed_date = Utc
            .with_ymd_and_hms(config.min_allowed_year, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| {
                Error::configuration(format!(
                    "min_allowed_year ({}) does not denote a valid date",
                    config.min_allowed_year
                ))
            })?;

        Ok(Self {
            config,
            min_allowed_date,
        })
    }

    /// The configuration this validator was built from
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Fast admissibility precondition, checked before any parsing
    ///
    /// Fails when the upload handle is absent or its contents are empty;
    /// returns the inner upload on success so callers need no re-check.
    pub fn check_upload<'a>(
        &self,
        upload: Option<&'a FileUpload>,
    ) -> std::result::Result<&'a FileUpload, PipelineError> {
        match upload {
            Some(upload) if !upload.contents.is_empty() => Ok(upload),
            _ => Err(PipelineError::empty_input("file is empty or missing")),
        }
    }

    /// Validate every record against the business constraints
    ///
    /// Exhaustive, never fail-fast: all three checks run for every record
    /// regardless of earlier failures, so a single record may contribute up
    /// to three errors. The returned sequence follows record order.
    pub fn validate_records(&self, records: &[MeasurementRecord]) -> Vec<PipelineError> {
        // One upper bound per invocation so every record is judged alike
        let now = Utc::now();

        let mut errors = Vec::new();
        for record in records {
            self.validate_record(record, now, &mut errors);
        }

        debug!(
            "Validated {} records: {} business errors",
            records.len(),
            errors.len()
        );

        errors
    }

    fn validate_record(
        &self,
        record: &MeasurementRecord,
        now: DateTime<Utc>,
        errors: &mut Vec<PipelineError>,
    ) {
        if record.timestamp < self.min_allowed_date || record.timestamp > now {
            errors.push(PipelineError::validation(
                record.line_number,
                format!(
                    "timestamp {} outside the allowed range ({}-01-01 to now)",
                    record.timestamp.format("%Y-%m-%d"),
                    self.config.min_allowed_year
                ),
            ));
        }

        if !self.config.allow_negative_execution_time && record.execution_time < 0.0 {
            errors.push(PipelineError::validation(
                record.line_number,
                format!(
                    "execution time cannot be negative ({})",
                    record.execution_time
                ),
            ));
        }

        if !self.config.allow_negative_value && record.value < 0.0 {
            errors.push(PipelineError::validation(
                record.line_number,
                format!("value cannot be negative ({})", record.value),
            ));
        }
    }

    /// Row-count policy: the valid record count must lie within the
    /// configured inclusive range
    pub fn check_row_count(&self, count: usize) -> std::result::Result<(), PipelineError> {
        if count < self.config.min_row_count || count > self.config.max_row_count {
            return Err(PipelineError::row_count(format!(
                "row count ({}) must be between {} and {}",
                count, self.config.min_row_count, self.config.max_row_count
            )));
        }
        Ok(())
    }
}
