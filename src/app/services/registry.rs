//! Parser registry with extension-based dispatch.
//!
//! Each parser advertises the file extensions it supports; the pipeline
//! performs a case-insensitive lookup instead of a type switch, so adding a
//! format means adding a registry entry only.

use crate::app::services::csv_parser::{CsvMeasurementParser, ParseOutcome};
use std::sync::Arc;

/// A parser for one family of measurement file formats
pub trait FileParser: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Dotted, lowercase extensions this parser accepts (e.g. `.csv`)
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Parse the decoded file text into records and per-line errors
    ///
    /// Pure function of its inputs: both returned sequences preserve source
    /// line order, and single bad lines never abort the whole file.
    fn parse(&self, text: &str, file_identity: &str) -> ParseOutcome;
}

/// Registry mapping file extensions to parser capabilities
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: Vec<Arc<dyn FileParser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Create a registry with the built-in parsers registered
    pub fn with_default_parsers() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CsvMeasurementParser));
        registry
    }

    /// Register an additional parser
    pub fn register(&mut self, parser: Arc<dyn FileParser>) {
        self.parsers.push(parser);
    }

    /// Find the first parser supporting the given dotted extension
    /// (matched case-insensitively)
    pub fn find_by_extension(&self, extension: &str) -> Option<Arc<dyn FileParser>> {
        let normalized = extension.to_ascii_lowercase();
        self.parsers
            .iter()
            .find(|p| p.supported_extensions().contains(&normalized.as_str()))
            .cloned()
    }

    /// Number of registered parsers
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether the registry has no parsers
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_default_parsers()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field(
                "parsers",
                &self.parsers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
