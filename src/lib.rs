//! Measurement Processor Library
//!
//! A Rust library for ingesting delimited measurement files (timestamp,
//! execution-time, value triples) into validated records and per-file
//! summary statistics.
//!
//! This library provides tools for:
//! - Line-oriented parsing of `;`-delimited measurement files with
//!   allocation-conscious field scanning
//! - Multi-format UTC timestamp recognition (colon and hyphen time
//!   separators, 0-7 fractional digits)
//! - Exhaustive business validation of parsed records against configured
//!   thresholds
//! - Single-pass aggregate and median computation per file
//! - A pipeline orchestrator that merges parse and validation errors into
//!   one line-ordered report and commits clean files to storage atomically

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_parser;
        pub mod processing;
        pub mod registry;
        pub mod statistics;
        pub mod validator;
    }
    pub mod adapters {
        pub mod storage;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FileSummary, FileUpload, MeasurementRecord, PipelineError};
pub use config::ValidationConfig;

/// Result type alias for the measurement processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for measurement processing operations
///
/// One pipeline invocation produces at most one failure: everything the
/// pipeline itself detects (empty input, unsupported format, parse and
/// validation errors, row-count policy) travels inside [`Error::Rejected`]
/// as a single ordered list. Only [`Error::Storage`] originates outside the
/// pipeline and is passed through for the caller to classify.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File rejected by the pipeline with an ordered error report
    #[error("file '{file_identity}' rejected with {} error(s)", errors.len())]
    Rejected {
        file_identity: String,
        errors: Vec<app::models::PipelineError>,
    },

    /// Storage collaborator failed to commit
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a rejection carrying the merged, ordered error list
    pub fn rejected(
        file_identity: impl Into<String>,
        errors: Vec<app::models::PipelineError>,
    ) -> Self {
        Self::Rejected {
            file_identity: file_identity.into(),
            errors,
        }
    }

    /// Create a storage error without an underlying source
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error wrapping a collaborator failure
    pub fn storage_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source),
        }
    }

    /// The ordered error report for a rejected file, if this is a rejection
    pub fn rejection_report(&self) -> Option<&[app::models::PipelineError]> {
        match self {
            Self::Rejected { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
