//! Test utilities for pipeline tests.
//!
//! This module provides a scripted mock backend.

pub mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockBehavior, MockResponse};
