//! Cucumber step definitions for scenario tests.

pub mod generator;
pub mod scenario;
