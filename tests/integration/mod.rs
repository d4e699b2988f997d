//! Integration tests module
//!
//! This module contains all integration tests for EventHub, organized by
//! functionality and test scenarios.


use crate::helpers::TestContext;

/// Common setup function for integration tests
pub fn setup_integration_test() -> TestContext {
    TestContext::new()
}
