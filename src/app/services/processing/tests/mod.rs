//! Tests for the ingestion pipeline
