//! Generation modes and the HTTP outcome each one implies.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;

use crate::error::GeneratorError;

/// Which end of a field's documented range to pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    Min,
    Max,
}

impl Boundary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Min => "min",
            Boundary::Max => "max",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Boundary {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimum" => Ok(Boundary::Min),
            "max" | "maximum" => Ok(Boundary::Max),
            _ => Err(GeneratorError::UnknownBoundary(s.to_string())),
        }
    }
}

/// What kind of record to generate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every field holds a realistic, schema-conformant value.
    Valid,
    /// Bounded fields pinned to their documented minimum or maximum.
    Boundary(Boundary),
    /// Exactly the named field violates its constraint.
    Invalid(String),
}

impl Mode {
    /// Build a mode from step-definition strings.
    ///
    /// `boundary` takes `min`/`max` as selector and `invalid` takes the wire
    /// name of the field to corrupt. `valid` ignores the selector. Whether the
    /// field exists is checked at generation time against the entity schema.
    pub fn parse(mode: &str, selector: Option<&str>) -> Result<Self, GeneratorError> {
        let mode = mode.trim().to_ascii_lowercase();
        match mode.as_str() {
            "valid" => Ok(Mode::Valid),
            "boundary" => {
                let variant = selector.ok_or_else(|| GeneratorError::MissingSelector(mode.clone()))?;
                Ok(Mode::Boundary(variant.parse()?))
            }
            "invalid" => match selector.map(str::trim) {
                Some(field) if !field.is_empty() => Ok(Mode::Invalid(field.to_string())),
                _ => Err(GeneratorError::MissingSelector(mode)),
            },
            _ => Err(GeneratorError::UnknownMode(mode)),
        }
    }

    /// Short name, without selector.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Valid => "valid",
            Mode::Boundary(_) => "boundary",
            Mode::Invalid(_) => "invalid",
        }
    }

    /// Response class the mocked API is expected to return for this mode.
    pub fn expected_outcome(&self) -> ExpectedOutcome {
        match self {
            Mode::Valid | Mode::Boundary(_) => ExpectedOutcome::Success,
            Mode::Invalid(_) => ExpectedOutcome::ClientError,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Valid => f.write_str("valid"),
            Mode::Boundary(variant) => write!(f, "boundary {}", variant),
            Mode::Invalid(field) => write!(f, "invalid {}", field),
        }
    }
}

/// Expected response class for a generated payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedOutcome {
    /// Any 2xx.
    Success,
    /// Any 4xx.
    ClientError,
}

impl ExpectedOutcome {
    pub fn accepts(&self, status: StatusCode) -> bool {
        match self {
            ExpectedOutcome::Success => status.is_success(),
            ExpectedOutcome::ClientError => status.is_client_error(),
        }
    }
}
