//! Command-line argument definitions for the measurement processor
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::config::ValidationConfig;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the measurement file processor
///
/// Ingests `;`-delimited measurement files (timestamp, execution time,
/// value) into validated records and per-file summary statistics.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "measurement-processor",
    version,
    about = "Validate and ingest delimited measurement files",
    long_about = "Parses ;-delimited measurement files (timestamp;execution_time;value), \
                  validates every record against configurable thresholds, computes per-file \
                  summary statistics, and commits clean files to storage. A file with any \
                  parse or validation error is rejected with a full line-ordered report."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the measurement processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse, validate and commit a measurement file (default command)
    Process(ProcessArgs),
    /// Validate a measurement file without committing anything
    Check(ProcessArgs),
}

/// Arguments shared by the process and check commands
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Measurement file to ingest
    ///
    /// The file name doubles as the file identity under which records and
    /// statistics are stored; reprocessing the same name replaces earlier
    /// data.
    #[arg(value_name = "FILE", help = "Measurement file to ingest")]
    pub file: PathBuf,

    /// Path to configuration file
    ///
    /// TOML file with validation thresholds. Flags given on the command
    /// line override values from the file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Earliest acceptable measurement year
    ///
    /// Records with a timestamp before January 1st of this year are
    /// rejected.
    #[arg(
        long = "min-year",
        value_name = "YEAR",
        help = "Earliest acceptable measurement year"
    )]
    pub min_allowed_year: Option<i32>,

    /// Minimum number of valid records per file
    #[arg(
        long = "min-rows",
        value_name = "COUNT",
        help = "Minimum number of valid records per file"
    )]
    pub min_row_count: Option<usize>,

    /// Maximum number of valid records per file
    #[arg(
        long = "max-rows",
        value_name = "COUNT",
        help = "Maximum number of valid records per file"
    )]
    pub max_row_count: Option<usize>,

    /// Accept records with a negative execution time
    #[arg(
        long = "allow-negative-execution-time",
        help = "Accept records with a negative execution time"
    )]
    pub allow_negative_execution_time: bool,

    /// Accept records with a negative value
    #[arg(
        long = "allow-negative-value",
        help = "Accept records with a negative value"
    )]
    pub allow_negative_value: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ProcessArgs {
    /// Validate the command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let (Some(min), Some(max)) = (self.min_row_count, self.max_row_count) {
            if min > max {
                return Err(Error::configuration(format!(
                    "min-rows ({}) cannot exceed max-rows ({})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Build the validation configuration from file and CLI overrides
    pub fn build_config(&self) -> Result<ValidationConfig> {
        let mut config = match &self.config_file {
            Some(path) => ValidationConfig::from_toml_file(path)?,
            None => ValidationConfig::default(),
        };

        if let Some(year) = self.min_allowed_year {
            config = config.with_min_allowed_year(year);
        }
        if self.min_row_count.is_some() || self.max_row_count.is_some() {
            let min = self.min_row_count.unwrap_or(config.min_row_count);
            let max = self.max_row_count.unwrap_or(config.max_row_count);
            config = config.with_row_count_range(min, max);
        }
        if self.allow_negative_execution_time {
            config = config.with_negative_execution_time_allowed();
        }
        if self.allow_negative_value {
            config = config.with_negative_value_allowed();
        }

        config.validate()?;
        Ok(config)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args_for(file: PathBuf) -> ProcessArgs {
        ProcessArgs {
            file,
            config_file: None,
            min_allowed_year: None,
            min_row_count: None,
            max_row_count: None,
            allow_negative_execution_time: false,
            allow_negative_value: false,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_requires_existing_file() {
        let args = args_for(PathBuf::from("/nonexistent/measurements.csv"));
        assert!(args.validate().is_err());

        let temp = NamedTempFile::new().unwrap();
        let args = args_for(temp.path().to_path_buf());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_inverted_row_bounds() {
        let temp = NamedTempFile::new().unwrap();
        let mut args = args_for(temp.path().to_path_buf());
        args.min_row_count = Some(10);
        args.max_row_count = Some(5);

        assert!(args.validate().is_err());
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let temp = NamedTempFile::new().unwrap();
        let mut args = args_for(temp.path().to_path_buf());
        args.min_allowed_year = Some(2010);
        args.max_row_count = Some(500);
        args.allow_negative_value = true;

        let config = args.build_config().unwrap();
        assert_eq!(config.min_allowed_year, 2010);
        assert_eq!(config.max_row_count, 500);
        assert!(config.allow_negative_value);
        assert!(!config.allow_negative_execution_time);
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let temp = NamedTempFile::new().unwrap();
        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(config_file, "min_allowed_year = 1995\nmax_row_count = 50").unwrap();

        let mut args = args_for(temp.path().to_path_buf());
        args.config_file = Some(config_file.path().to_path_buf());
        args.min_allowed_year = Some(2005);

        let config = args.build_config().unwrap();
        assert_eq!(config.min_allowed_year, 2005);
        assert_eq!(config.max_row_count, 50);
    }

    #[test]
    fn test_log_level() {
        let temp = NamedTempFile::new().unwrap();
        let mut args = args_for(temp.path().to_path_buf());

        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }
}
