//! banking-fixtures - test data for banking API BDD suites
//!
//! Generates customer, account, booking, loan and term-deposit payloads in
//! valid, boundary and invalid modes, validates them against the entity
//! schemas, and carries per-scenario request state (correlation ID, auth,
//! endpoints) for step definitions.

pub mod config;
pub mod error;
pub mod generator;
pub mod records;
pub mod scenario;
pub mod schema;
pub mod utils;
pub mod validation;

pub use config::{ConfigError, TestConfig};
pub use error::{GeneratorError, Result};
pub use generator::{
    generate, generate_batch, generate_correlation_id, generate_named, Boundary, DataGenerator,
    ExpectedOutcome, Mode, PerformanceFixture, Preset,
};
pub use records::{Payload, Record};
pub use scenario::{ScenarioContext, ScenarioError};
pub use schema::{validate, EntityKind, FieldSpec, FieldType, Violation};
