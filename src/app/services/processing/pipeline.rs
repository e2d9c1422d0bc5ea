//! Main ingestion pipeline implementation
//!
//! One invocation walks a fixed sequence of states: admissibility check,
//! parser dispatch, parsing, record validation, error merge, row-count
//! policy, statistics, commit. A non-empty merged error list aborts before
//! statistics; the storage collaborator is only ever invoked for a file
//! with zero errors, and exactly once.

use crate::app::adapters::storage::MeasurementStore;
use crate::app::models::{FileUpload, MeasurementRecord, PipelineError};
use crate::app::services::registry::ParserRegistry;
use crate::app::services::statistics;
use crate::app::services::validator::ValueValidator;
use crate::config::ValidationConfig;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Merge parse and validation errors into the single user-facing report
///
/// Stable sort ascending by line number, line-number-less errors last.
/// Errors sharing a line number keep concatenation order: parse errors
/// before validation errors.
pub fn merge_errors(
    parse_errors: Vec<PipelineError>,
    validation_errors: Vec<PipelineError>,
) -> Vec<PipelineError> {
    let mut merged = parse_errors;
    merged.extend(validation_errors);
    merged.sort_by_key(PipelineError::order_key);
    merged
}

/// Orchestrator for one-file ingestion invocations
///
/// Holds only immutable configuration and the storage handle; distinct
/// invocations share no mutable state, so concurrent calls are safe
/// without locking.
#[derive(Debug)]
pub struct DataPipeline<S> {
    registry: ParserRegistry,
    validator: ValueValidator,
    store: Arc<S>,
}

impl<S: MeasurementStore> DataPipeline<S> {
    /// Create a pipeline from explicit collaborators
    pub fn new(registry: ParserRegistry, validator: ValueValidator, store: Arc<S>) -> Self {
        Self {
            registry,
            validator,
            store,
        }
    }

    /// Create a pipeline with the built-in parsers and the given thresholds
    pub fn with_default_parsers(config: ValidationConfig, store: Arc<S>) -> Result<Self> {
        Ok(Self::new(
            ParserRegistry::with_default_parsers(),
            ValueValidator::new(config)?,
            store,
        ))
    }

    /// Process one uploaded file end to end
    ///
    /// On success returns the number of committed records. On failure
    /// returns [`Error::Rejected`] carrying the full merged, ordered error
    /// list; partial or dirty data is never persisted. Storage failures
    /// propagate verbatim as [`Error::Storage`].
    pub async fn process_upload(&self, upload: Option<FileUpload>) -> Result<usize> {
        let total_timer = Instant::now();
        let (file_identity, records) = self.admit_and_validate(upload)?;

        let stats_timer = Instant::now();
        let summary = statistics::summarize(&file_identity, &records);
        let stats_ms = stats_timer.elapsed().as_millis();

        let store_timer = Instant::now();
        self.store
            .replace_file_data(&file_identity, &records, &summary)
            .await?;
        let store_ms = store_timer.elapsed().as_millis();

        info!(
            "File '{}' processed in {} ms (statistics {} ms, storage {} ms): {} records committed",
            file_identity,
            total_timer.elapsed().as_millis(),
            stats_ms,
            store_ms,
            records.len()
        );

        Ok(records.len())
    }

    /// Dry run: admissibility, parsing, validation and row-count policy
    /// only, without computing statistics or touching storage
    ///
    /// Returns the count of records that would be committed.
    pub async fn check_upload(&self, upload: Option<FileUpload>) -> Result<usize> {
        let (file_identity, records) = self.admit_and_validate(upload)?;
        debug!(
            "Dry run for '{}': {} records would be committed",
            file_identity,
            records.len()
        );
        Ok(records.len())
    }

    /// States `ReceivedFile` through `RowCountChecked`: everything up to,
    /// but excluding, statistics and commit
    fn admit_and_validate(
        &self,
        upload: Option<FileUpload>,
    ) -> Result<(String, Vec<MeasurementRecord>)> {
        let upload = match self.validator.check_upload(upload.as_ref()) {
            Ok(upload) => upload,
            Err(error) => {
                let identity = upload
                    .as_ref()
                    .map(|u| u.file_name.clone())
                    .unwrap_or_default();
                warn!("Upload '{}' inadmissible: {}", identity, error);
                return Err(Error::rejected(identity, vec![error]));
            }
        };
        let file_identity = upload.file_name.clone();

        let extension = upload.extension();
        let Some(parser) = extension
            .as_deref()
            .and_then(|ext| self.registry.find_by_extension(ext))
        else {
            let error = PipelineError::unsupported_format(format!(
                "file format '{}' is not supported",
                extension.as_deref().unwrap_or("")
            ));
            warn!("File '{}' rejected: {}", file_identity, error);
            return Err(Error::rejected(file_identity, vec![error]));
        };

        debug!(
            "Processing '{}' with the '{}' parser",
            file_identity,
            parser.name()
        );

        // Invalid UTF-8 becomes replacement characters; mangled fields then
        // fail ordinary line parsing with line-numbered errors.
        let text = String::from_utf8_lossy(&upload.contents);

        let parse_timer = Instant::now();
        let outcome = parser.parse(&text, &file_identity);
        let parse_ms = parse_timer.elapsed().as_millis();

        let validation_timer = Instant::now();
        let validation_errors = self.validator.validate_records(&outcome.records);
        let validation_ms = validation_timer.elapsed().as_millis();

        let errors = merge_errors(outcome.errors, validation_errors);
        if !errors.is_empty() {
            warn!(
                "File '{}' contains {} error(s); processing aborted (parse {} ms, validation {} ms)",
                file_identity,
                errors.len(),
                parse_ms,
                validation_ms
            );
            return Err(Error::rejected(file_identity, errors));
        }

        // Only an error-free count is meaningful to the row-count policy
        if let Err(error) = self.validator.check_row_count(outcome.records.len()) {
            warn!("File '{}' rejected: {}", file_identity, error);
            return Err(Error::rejected(file_identity, vec![error]));
        }

        debug!(
            "File '{}' clean: {} records (parse {} ms, validation {} ms)",
            file_identity,
            outcome.records.len(),
            parse_ms,
            validation_ms
        );

        Ok((file_identity, outcome.records))
    }
}
