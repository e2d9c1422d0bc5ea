//! Tests for summary statistics
