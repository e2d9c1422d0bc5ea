//! Tests for the CSV measurement parser

pub mod parser_tests;
