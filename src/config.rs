//! Configuration for measurement file validation.
//!
//! Validation thresholds are carried as an explicit immutable value passed
//! into the validator at construction; there is no ambient or global state.
//! Values can come from defaults, a TOML file, or CLI overrides layered on
//! top.

use crate::constants::{DEFAULT_MAX_ROW_COUNT, DEFAULT_MIN_ALLOWED_YEAR, DEFAULT_MIN_ROW_COUNT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Validation thresholds for ingested measurement files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum year accepted in record timestamps (range lower bound is
    /// January 1 of this year, UTC)
    pub min_allowed_year: i32,

    /// Minimum number of valid data rows per file (inclusive)
    pub min_row_count: usize,

    /// Maximum number of valid data rows per file (inclusive)
    pub max_row_count: usize,

    /// Accept negative execution times
    pub allow_negative_execution_time: bool,

    /// Accept negative measurement values
    pub allow_negative_value: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_allowed_year: DEFAULT_MIN_ALLOWED_YEAR,
            min_row_count: DEFAULT_MIN_ROW_COUNT,
            max_row_count: DEFAULT_MAX_ROW_COUNT,
            allow_negative_execution_time: false,
            allow_negative_value: false,
        }
    }
}

impl ValidationConfig {
    /// Load configuration overrides from a TOML file
    ///
    /// Missing keys fall back to their defaults, so a partial file is valid.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read config file {}", path.display()), e))?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!("invalid config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the thresholds
    pub fn validate(&self) -> Result<()> {
        if self.min_row_count > self.max_row_count {
            return Err(Error::configuration(format!(
                "min_row_count ({}) must not exceed max_row_count ({})",
                self.min_row_count, self.max_row_count
            )));
        }

        // chrono cannot represent years outside this range
        if !(1..=9999).contains(&self.min_allowed_year) {
            return Err(Error::configuration(format!(
                "min_allowed_year ({}) must be between 1 and 9999",
                self.min_allowed_year
            )));
        }

        Ok(())
    }

    /// Set the minimum accepted timestamp year
    pub fn with_min_allowed_year(mut self, year: i32) -> Self {
        self.min_allowed_year = year;
        self
    }

    /// Set the admissible row-count range
    pub fn with_row_count_range(mut self, min: usize, max: usize) -> Self {
        self.min_row_count = min;
        self.max_row_count = max;
        self
    }

    /// Accept negative execution times
    pub fn with_negative_execution_time_allowed(mut self) -> Self {
        self.allow_negative_execution_time = true;
        self
    }

    /// Accept negative measurement values
    pub fn with_negative_value_allowed(mut self) -> Self {
        self.allow_negative_value = true;
        self
    }
}
