//! Storage collaborator interface and in-memory reference implementation
//!
//! The pipeline depends on storage through a single "commit a file's
//! records and summary atomically" call with replace-by-identity semantics;
//! how that atomicity is achieved (transactions, bulk loading, indexing) is
//! the collaborator's concern. [`InMemoryStore`] provides those semantics
//! over a map for the CLI and for tests.

use crate::app::models::{FileSummary, MeasurementRecord, SummaryFilter};
use crate::Result;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::RwLock;
use tracing::debug;

/// Sink for committed measurement data, keyed by file identity
///
/// `replace_file_data` must atomically supersede any prior data stored
/// under the same identity; the pipeline treats the call as all-or-nothing
/// and does not retry on failure.
pub trait MeasurementStore: Send + Sync {
    /// Atomically replace all records and the summary for one file identity
    fn replace_file_data(
        &self,
        file_identity: &str,
        records: &[MeasurementRecord],
        summary: &FileSummary,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Summaries matching every bound of the filter
    fn summaries(&self, filter: &SummaryFilter) -> impl Future<Output = Result<Vec<FileSummary>>> + Send;

    /// The most recent records for a file identity, newest first
    fn recent_records(
        &self,
        file_identity: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<MeasurementRecord>>> + Send;
}

#[derive(Debug, Clone)]
struct StoredFile {
    records: Vec<MeasurementRecord>,
    summary: FileSummary,
}

/// In-memory measurement store with replace-by-identity semantics
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: RwLock<HashMap<String, StoredFile>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of file identities currently stored
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

impl MeasurementStore for InMemoryStore {
    async fn replace_file_data(
        &self,
        file_identity: &str,
        records: &[MeasurementRecord],
        summary: &FileSummary,
    ) -> Result<()> {
        let mut files = self.files.write().await;
        files.insert(
            file_identity.to_string(),
            StoredFile {
                records: records.to_vec(),
                summary: summary.clone(),
            },
        );

        debug!(
            "Stored {} records for '{}' (replace-by-identity)",
            records.len(),
            file_identity
        );

        Ok(())
    }

    async fn summaries(&self, filter: &SummaryFilter) -> Result<Vec<FileSummary>> {
        let files = self.files.read().await;
        let mut matching: Vec<FileSummary> = files
            .values()
            .map(|f| &f.summary)
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();

        // Map iteration order is arbitrary; present summaries stably
        matching.sort_by(|a, b| a.file_identity.cmp(&b.file_identity));
        Ok(matching)
    }

    async fn recent_records(&self, file_identity: &str, limit: usize) -> Result<Vec<MeasurementRecord>> {
        let files = self.files.read().await;
        let Some(stored) = files.get(file_identity) else {
            return Ok(Vec::new());
        };

        let mut records = stored.records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        Ok(records)
    }
}
