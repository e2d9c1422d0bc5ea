//! Summary statistics for validated measurement records
//!
//! Reduces a record set to exactly one [`FileSummary`]: a single fold over
//! the records computes the date range, running sums and value extremes,
//! and one ascending sort of the values yields the median. An empty record
//! set is a valid input and produces the all-zero summary, not an error.

use crate::app::models::{FileSummary, MeasurementRecord};
use chrono::{DateTime, Utc};

#[cfg(test)]
pub mod tests;

/// Aggregate state threaded through the fold
#[derive(Debug, Clone, Copy)]
struct Aggregate {
    min_date: DateTime<Utc>,
    max_date: DateTime<Utc>,
    sum_execution_time: f64,
    sum_value: f64,
    min_value: f64,
    max_value: f64,
}

impl Aggregate {
    fn seed(record: &MeasurementRecord) -> Self {
        Self {
            min_date: record.timestamp,
            max_date: record.timestamp,
            sum_execution_time: 0.0,
            sum_value: 0.0,
            min_value: record.value,
            max_value: record.value,
        }
    }

    fn accumulate(mut self, record: &MeasurementRecord) -> Self {
        self.min_date = self.min_date.min(record.timestamp);
        self.max_date = self.max_date.max(record.timestamp);
        self.sum_execution_time += record.execution_time;
        self.sum_value += record.value;
        self.min_value = self.min_value.min(record.value);
        self.max_value = self.max_value.max(record.value);
        self
    }
}

/// Compute the summary for one file's record set
///
/// Pure function of its inputs; re-running it on the same records yields
/// bit-identical fields. All statistics are double precision with no
/// rounding beyond natural floating-point arithmetic.
pub fn summarize(file_identity: &str, records: &[MeasurementRecord]) -> FileSummary {
    let Some(first) = records.first() else {
        return FileSummary::empty(file_identity);
    };

    let aggregate = records
        .iter()
        .fold(Aggregate::seed(first), Aggregate::accumulate);

    let count = records.len() as f64;
    let time_delta = aggregate.max_date - aggregate.min_date;
    // num_microseconds cannot overflow for representable chrono dates, but
    // fall back to whole seconds rather than panic
    let time_delta_seconds = match time_delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => time_delta.num_seconds() as f64,
    };

    FileSummary {
        file_identity: file_identity.to_string(),
        time_delta_seconds,
        min_date: aggregate.min_date,
        avg_execution_time: aggregate.sum_execution_time / count,
        avg_value: aggregate.sum_value / count,
        median_value: median(records),
        max_value: aggregate.max_value,
        min_value: aggregate.min_value,
    }
}

/// Median of the value field across all records
///
/// Requires a full ascending sort; for an even count the median is the
/// arithmetic mean of the two middle elements.
fn median(records: &[MeasurementRecord]) -> f64 {
    let mut values: Vec<f64> = records.iter().map(|r| r.value).collect();
    values.sort_by(f64::total_cmp);

    let count = values.len();
    if count % 2 == 0 {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    } else {
        values[count / 2]
    }
}
