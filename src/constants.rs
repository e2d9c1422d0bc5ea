//! Constants for measurement file ingestion.
//!
//! Default validation thresholds and the fixed parameters of the
//! recognized input grammar live here so that the parser, validator and
//! CLI agree on a single source of truth.

/// Field separator for delimited measurement lines
pub const FIELD_SEPARATOR: char = ';';

/// Maximum number of fractional-second digits the timestamp grammar accepts
pub const MAX_FRACTION_DIGITS: usize = 7;

/// Timestamp base format with colon time separators (fraction handled separately)
pub const TIMESTAMP_FORMAT_COLON: &str = "%Y-%m-%dT%H:%M:%S";

/// Timestamp base format with hyphen time separators (fraction handled separately)
pub const TIMESTAMP_FORMAT_HYPHEN: &str = "%Y-%m-%dT%H-%M-%S";

/// Default minimum year accepted in record timestamps
pub const DEFAULT_MIN_ALLOWED_YEAR: i32 = 2000;

/// Default minimum number of data rows per file
pub const DEFAULT_MIN_ROW_COUNT: usize = 1;

/// Default maximum number of data rows per file
pub const DEFAULT_MAX_ROW_COUNT: usize = 10_000;

/// Number of records returned by the "recent records" storage query
pub const RECENT_RECORDS_LIMIT: usize = 10;
