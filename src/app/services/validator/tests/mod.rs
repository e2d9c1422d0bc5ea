//! Tests for business validation
