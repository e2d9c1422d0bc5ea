//! Core data models for measurement file ingestion.
//!
//! Records and summaries are created fresh per pipeline invocation and
//! handed to the storage collaborator as one unit; pipeline errors only
//! survive an invocation when the file is rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed data line from a measurement file
///
/// Every record in memory carries a fully parsed timestamp and numeric
/// fields; parse failures never produce a record. The timestamp is always
/// normalized to UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Logical grouping key (commonly the uploaded file's name)
    pub file_identity: String,

    /// Measurement timestamp, normalized to UTC
    pub timestamp: DateTime<Utc>,

    /// Execution time of the measured operation
    pub execution_time: f64,

    /// Measured value
    pub value: f64,

    /// 1-based source line (header counted as line 1); used only for error
    /// attribution and never persisted
    #[serde(skip)]
    pub line_number: usize,
}

/// Per-file summary statistics
///
/// For a non-empty record set, `min_value <= median_value <= max_value` and
/// `min_date` does not exceed any contributing timestamp. For an empty set
/// all numeric fields are zero and `min_date` is the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    /// Logical grouping key the summary belongs to
    pub file_identity: String,

    /// Seconds between the newest and oldest record timestamps
    pub time_delta_seconds: f64,

    /// Oldest record timestamp
    pub min_date: DateTime<Utc>,

    /// Mean execution time across all records
    pub avg_execution_time: f64,

    /// Mean value across all records
    pub avg_value: f64,

    /// Median value across all records
    pub median_value: f64,

    /// Largest value
    pub max_value: f64,

    /// Smallest value
    pub min_value: f64,
}

impl FileSummary {
    /// Summary of an empty record set: all numeric fields zero, `min_date`
    /// at the Unix epoch (this crate's zero instant)
    pub fn empty(file_identity: impl Into<String>) -> Self {
        Self {
            file_identity: file_identity.into(),
            time_delta_seconds: 0.0,
            min_date: DateTime::UNIX_EPOCH,
            avg_execution_time: 0.0,
            avg_value: 0.0,
            median_value: 0.0,
            max_value: 0.0,
            min_value: 0.0,
        }
    }
}

/// Classification of a pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// File absent, zero-length, or missing its header line (fatal)
    EmptyInput,
    /// A single data line could not be parsed (line dropped, processing continues)
    Parse,
    /// A parsed record violated a business constraint (exhaustive, per record)
    Validation,
    /// Valid record count outside the configured range (fatal)
    RowCount,
    /// No registered parser matched the file extension (fatal)
    UnsupportedFormat,
}

/// One user-facing pipeline error
///
/// The line number is carried as a structured field from the moment the
/// error is created; it is never reconstructed from the rendered message.
/// Errors without a line number sort after all line-numbered errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineError {
    /// Error classification
    pub kind: ErrorKind,

    /// 1-based source line the error is attributed to, if any
    pub line: Option<usize>,

    /// Human-readable reason, without the line prefix
    pub message: String,
}

impl PipelineError {
    /// Structural parse error attributed to a source line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            line: Some(line),
            message: message.into(),
        }
    }

    /// Business validation error attributed to a source line
    pub fn validation(line: usize, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            line: Some(line),
            message: message.into(),
        }
    }

    /// Fatal file-level error: absent, empty or headerless input
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::EmptyInput,
            line: None,
            message: message.into(),
        }
    }

    /// Fatal file-level error: valid record count outside the allowed range
    pub fn row_count(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::RowCount,
            line: None,
            message: message.into(),
        }
    }

    /// Fatal file-level error: no parser for the file's extension
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnsupportedFormat,
            line: None,
            message: message.into(),
        }
    }

    /// Sort key placing line-numbered errors first, in ascending line order
    pub fn order_key(&self) -> (bool, Option<usize>) {
        (self.line.is_none(), self.line)
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// An uploaded measurement file as handed over by the transport layer
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name; doubles as the file identity
    pub file_name: String,

    /// Raw file contents
    pub contents: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            contents,
        }
    }

    /// Dotted, lowercased file extension (e.g. `.csv`), if any
    pub fn extension(&self) -> Option<String> {
        let (_, extension) = self.file_name.rsplit_once('.')?;
        if extension.is_empty() {
            return None;
        }
        Some(format!(".{}", extension.to_ascii_lowercase()))
    }
}

/// Filter for querying stored file summaries
///
/// All bounds are optional and inclusive; an empty filter matches every
/// summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryFilter {
    /// Match a single file identity exactly
    pub file_identity: Option<String>,

    /// Lower bound on `min_date`
    pub min_date_from: Option<DateTime<Utc>>,

    /// Upper bound on `min_date`
    pub min_date_to: Option<DateTime<Utc>>,

    /// Lower bound on `avg_value`
    pub avg_value_from: Option<f64>,

    /// Upper bound on `avg_value`
    pub avg_value_to: Option<f64>,

    /// Lower bound on `avg_execution_time`
    pub avg_execution_time_from: Option<f64>,

    /// Upper bound on `avg_execution_time`
    pub avg_execution_time_to: Option<f64>,
}

impl SummaryFilter {
    /// Whether a summary satisfies every bound set on this filter
    pub fn matches(&self, summary: &FileSummary) -> bool {
        if let Some(identity) = &self.file_identity {
            if &summary.file_identity != identity {
                return false;
            }
        }

        let within = |value: f64, from: Option<f64>, to: Option<f64>| {
            from.is_none_or(|f| value >= f) && to.is_none_or(|t| value <= t)
        };

        self.min_date_from.is_none_or(|f| summary.min_date >= f)
            && self.min_date_to.is_none_or(|t| summary.min_date <= t)
            && within(summary.avg_value, self.avg_value_from, self.avg_value_to)
            && within(
                summary.avg_execution_time,
                self.avg_execution_time_from,
                self.avg_execution_time_to,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_display_with_line() {
        let error = PipelineError::parse(7, "malformed line (missing field separator)");
        assert_eq!(
            error.to_string(),
            "Line 7: malformed line (missing field separator)"
        );
    }

    #[test]
    fn test_pipeline_error_display_without_line() {
        let error = PipelineError::unsupported_format("file format '.xml' is not supported");
        assert_eq!(error.to_string(), "file format '.xml' is not supported");
    }

    #[test]
    fn test_order_key_places_file_level_errors_last() {
        let line_error = PipelineError::validation(3, "bad");
        let file_error = PipelineError::row_count("too many rows");

        assert!(line_error.order_key() < file_error.order_key());
    }

    #[test]
    fn test_upload_extension_is_dotted_and_lowercased() {
        let upload = FileUpload::new("Report.CSV", b"data".to_vec());
        assert_eq!(upload.extension().as_deref(), Some(".csv"));

        let upload = FileUpload::new("archive.tar.gz", b"data".to_vec());
        assert_eq!(upload.extension().as_deref(), Some(".gz"));

        let upload = FileUpload::new("no_extension", b"data".to_vec());
        assert_eq!(upload.extension(), None);

        let upload = FileUpload::new("trailing.", b"data".to_vec());
        assert_eq!(upload.extension(), None);
    }

    #[test]
    fn test_empty_summary_uses_epoch_zero_instant() {
        let summary = FileSummary::empty("a.csv");

        assert_eq!(summary.min_date, DateTime::UNIX_EPOCH);
        assert_eq!(summary.time_delta_seconds, 0.0);
        assert_eq!(summary.median_value, 0.0);
    }

    #[test]
    fn test_summary_filter_bounds_are_inclusive() {
        let mut summary = FileSummary::empty("a.csv");
        summary.avg_value = 10.0;

        let filter = SummaryFilter {
            avg_value_from: Some(10.0),
            avg_value_to: Some(10.0),
            ..Default::default()
        };
        assert!(filter.matches(&summary));

        let filter = SummaryFilter {
            avg_value_from: Some(10.1),
            ..Default::default()
        };
        assert!(!filter.matches(&summary));
    }

    #[test]
    fn test_summary_filter_identity_is_exact() {
        let summary = FileSummary::empty("a.csv");

        let filter = SummaryFilter {
            file_identity: Some("a.csv".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&summary));

        let filter = SummaryFilter {
            file_identity: Some("A.csv".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&summary));
    }
}
