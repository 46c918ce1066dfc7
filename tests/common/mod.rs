//! Common test utilities for climplot.
//!
//! This module provides shared fixtures and assertions for the integration tests.

// Not every test binary uses every helper
#![allow(dead_code)]

pub mod assertions;
pub mod test_data;
