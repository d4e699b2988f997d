//! Test helpers module
//!
//! This module provides utilities and helpers for testing the EventHub
//! services: a ready-wired test context and generated test data.

#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

#[allow(unused_imports)]
pub use test_context::*;
#[allow(unused_imports)]
pub use test_data::*;
