//! Error types for fixture generation.
//!
//! Every variant is a test-authoring mistake (unknown kind, unknown field,
//! impossible batch). None of them is transient, so callers should surface
//! them immediately instead of retrying.

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised by the fixture generator.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Entity kind is not one of customer, account, booking, loan, term_deposit.
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),

    /// Generation mode is not one of valid, boundary, invalid.
    #[error("unknown generation mode: {0}")]
    UnknownMode(String),

    /// Boundary variant is not min or max.
    #[error("unknown boundary variant: {0} (expected min or max)")]
    UnknownBoundary(String),

    /// Mode requires a selector (boundary variant or field name) that was not given.
    #[error("mode '{0}' requires a selector")]
    MissingSelector(String),

    /// Field does not exist on the entity's schema.
    #[error("field '{field}' does not exist on {kind}")]
    UnknownField { kind: String, field: String },

    /// Named preset does not exist.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Batch size exceeds the number of distinct identifiers the generator can produce.
    #[error("cannot generate {requested} distinct {kind} records (capacity: {capacity})")]
    BatchTooLarge {
        kind: String,
        requested: usize,
        capacity: usize,
    },

    /// Payload could not be encoded or decoded.
    #[error("payload encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Returns true if the error names a field or kind absent from the schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            GeneratorError::UnknownEntityKind(_) | GeneratorError::UnknownField { .. }
        )
    }
}
