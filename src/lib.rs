//! Fixture runner - setup/body/teardown lifecycle for isolated test cases
//!
//! This library runs a test case against a freshly constructed fixture,
//! guarantees teardown on every path, and classifies the result as a pass,
//! an expected signal, an unexpected failure, or an assertion failure.

pub mod cli;
pub mod commands;
pub mod common;
pub mod fixtures;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{Fixture, Outcome, Suite, TestCase};
