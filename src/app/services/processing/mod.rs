//! Pipeline orchestration for measurement file ingestion
//!
//! Composes the parser registry, validator and statistics engine, merges
//! their error output into one line-ordered report, enforces the row-count
//! policy, and commits each clean file to the storage collaborator exactly
//! once.

pub mod pipeline;

#[cfg(test)]
pub mod tests;

pub use pipeline::{DataPipeline, merge_errors};
