//! Tests for the CSV line loop: header handling, field splitting, error
//! attribution and ordering

use crate::app::models::ErrorKind;
use crate::app::services::csv_parser::CsvMeasurementParser;
use crate::app::services::registry::FileParser;
use chrono::{TimeZone, Utc};

const IDENTITY: &str = "measurements.csv";

fn parse(text: &str) -> crate::app::services::csv_parser::ParseOutcome {
    CsvMeasurementParser.parse(text, IDENTITY)
}

#[test]
fn test_well_formed_file() {
    let outcome = parse(
        "Date;ExecutionTime;Value\n\
         2023-01-01T10:00:00Z;0.1;100.0\n\
         2023-01-01T11:00:00Z;0.2;200.0\n\
         2023-01-01T12:00:00Z;0.3;300.0\n",
    );

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.records.len(), 3);

    let first = &outcome.records[0];
    assert_eq!(first.file_identity, IDENTITY);
    assert_eq!(
        first.timestamp,
        Utc.with_ymd_and_hms(2023, 1, 1, 10, 0, 0).unwrap()
    );
    assert_eq!(first.execution_time, 0.1);
    assert_eq!(first.value, 100.0);
    assert_eq!(first.line_number, 2); // header is line 1
}

#[test]
fn test_header_content_is_never_validated() {
    let outcome = parse("garbage;;;header;;with;odd,shape\n2023-01-01T10:00:00Z;1;2\n");

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn test_empty_input_reports_missing_header() {
    for text in ["", "\n", "   \n2023-01-01T10:00:00Z;1;2\n"] {
        let outcome = parse(text);

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].kind, ErrorKind::EmptyInput);
        assert_eq!(outcome.errors[0].line, None);
        assert_eq!(outcome.errors[0].to_string(), "file is empty (missing header)");
    }
}

#[test]
fn test_blank_data_lines_are_skipped_but_counted() {
    let outcome = parse(
        "header\n\
         \n\
         2023-01-01T10:00:00Z;1;2\n\
         \t  \n\
         bad line\n",
    );

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].line_number, 3);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line, Some(5));
}

#[test]
fn test_missing_separators() {
    let outcome = parse(
        "header\n\
         no separators at all\n\
         2023-01-01T10:00:00Z;only one\n",
    );

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 2);
    assert_eq!(
        outcome.errors[0].to_string(),
        "Line 2: malformed line (missing field separator)"
    );
    assert_eq!(
        outcome.errors[1].to_string(),
        "Line 3: malformed line (missing second field separator)"
    );
}

#[test]
fn test_extra_separators_belong_to_the_value_field() {
    // Only the first two separators are significant; a third makes the
    // value field unparseable rather than producing a fourth field.
    let outcome = parse("header\n2023-01-01T10:00:00Z;1;2;3\n");

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].to_string(), "Line 2: invalid value '2;3'");
}

#[test]
fn test_fields_are_trimmed() {
    let outcome = parse("header\n  2023-01-01T10:00:00Z\t; 0.5 ;  42.0  \n");

    assert!(outcome.errors.is_empty());
    let record = &outcome.records[0];
    assert_eq!(record.execution_time, 0.5);
    assert_eq!(record.value, 42.0);
}

#[test]
fn test_first_failing_field_wins() {
    // Timestamp and value are both invalid; only the timestamp is reported.
    let outcome = parse("header\nnot-a-date;also-bad;nope\n");

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(
        outcome.errors[0].to_string(),
        "Line 2: invalid timestamp 'not-a-date'"
    );
}

#[test]
fn test_each_field_error_names_the_offending_literal() {
    let outcome = parse(
        "header\n\
         2023-99-01T10:00:00Z;1;2\n\
         2023-01-01T10:00:00Z;fast;2\n\
         2023-01-01T10:00:00Z;1;tall\n",
    );

    assert_eq!(outcome.errors.len(), 3);
    assert_eq!(
        outcome.errors[0].to_string(),
        "Line 2: invalid timestamp '2023-99-01T10:00:00Z'"
    );
    assert_eq!(
        outcome.errors[1].to_string(),
        "Line 3: invalid execution time 'fast'"
    );
    assert_eq!(outcome.errors[2].to_string(), "Line 4: invalid value 'tall'");
    for error in &outcome.errors {
        assert_eq!(error.kind, ErrorKind::Parse);
    }
}

#[test]
fn test_bad_lines_do_not_abort_the_file() {
    let outcome = parse(
        "header\n\
         2023-01-01T10:00:00Z;1;10\n\
         broken\n\
         2023-01-01T11:00:00Z;2;20\n",
    );

    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.records[1].line_number, 4);
}

#[test]
fn test_output_preserves_source_line_order() {
    let outcome = parse(
        "header\n\
         2023-01-03T10:00:00Z;1;30\n\
         bad one\n\
         2023-01-01T10:00:00Z;1;10\n\
         bad two\n\
         2023-01-02T10:00:00Z;1;20\n",
    );

    let record_lines: Vec<usize> = outcome.records.iter().map(|r| r.line_number).collect();
    assert_eq!(record_lines, vec![2, 4, 6]);

    let error_lines: Vec<Option<usize>> = outcome.errors.iter().map(|e| e.line).collect();
    assert_eq!(error_lines, vec![Some(3), Some(5)]);
}

#[test]
fn test_unpadded_timestamp_is_a_parse_error_not_a_record() {
    let outcome = parse(
        "header\n\
         2023-1-01T10:00:00Z;0.1;100.0\n",
    );

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(
        outcome.errors[0].to_string(),
        "Line 2: invalid timestamp '2023-1-01T10:00:00Z'"
    );
}

#[test]
fn test_both_timestamp_conventions_in_one_file() {
    let outcome = parse(
        "header\n\
         2023-01-01T10:00:00Z;1;1\n\
         2023-01-01T10-00-01.250Z;1;2\n",
    );

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.records[1].timestamp > outcome.records[0].timestamp);
}

#[test]
fn test_crlf_line_endings() {
    let outcome = parse("header\r\n2023-01-01T10:00:00Z;0.1;100.0\r\n");

    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].value, 100.0);
}

#[test]
fn test_parsed_timestamps_are_utc() {
    let outcome = parse("header\n2023-01-01T10:00:00Z;1;2\n");

    let record = &outcome.records[0];
    assert_eq!(record.timestamp.timezone(), Utc);
}
