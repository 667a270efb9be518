//! Per-scenario request context.
//!
//! Each scenario builds its own [`ScenarioContext`] from the shared
//! [`TestConfig`]: a fresh correlation ID, its own auth state and its own
//! fixture generator. Nothing is stored globally, so scenarios running in
//! parallel cannot see each other's headers.

use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{info, warn};

use crate::config::TestConfig;
use crate::generator::{generate_correlation_id, DataGenerator};
use crate::schema::EntityKind;
use crate::validation::validate_correlation_id;

/// User agent sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("banking-fixtures/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building or checking request headers.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("response is missing the {header} header")]
    CorrelationMissing { header: String },

    #[error("correlation ID mismatch: sent {expected}, received {actual}")]
    CorrelationMismatch { expected: String, actual: String },

    #[error("invalid correlation ID: {0}")]
    InvalidCorrelationId(String),

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// State threaded through the steps of one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    config: TestConfig,
    correlation_id: String,
    auth_token: Option<String>,
    generator: DataGenerator,
}

impl ScenarioContext {
    /// Start a scenario with a fresh correlation ID and the configured token.
    pub fn new(config: TestConfig) -> Result<Self, ScenarioError> {
        let correlation_id = generate_correlation_id();
        validate_correlation_id(&correlation_id).map_err(ScenarioError::InvalidCorrelationId)?;
        let auth_token = Some(config.auth_token.clone()).filter(|t| !t.is_empty());

        info!(
            correlation_id = %correlation_id,
            environment = %config.environment,
            "Scenario context created"
        );

        Ok(Self {
            config,
            correlation_id,
            auth_token,
            generator: DataGenerator::new(),
        })
    }

    /// Replace the correlation ID, e.g. to replay a recorded request.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Result<Self, ScenarioError> {
        let id = id.into();
        validate_correlation_id(&id).map_err(ScenarioError::InvalidCorrelationId)?;
        self.correlation_id = id;
        Ok(self)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.set_auth_token(Some(token.into()));
        self
    }

    /// Drop credentials, for unauthorized-access scenarios.
    pub fn without_auth(mut self) -> Self {
        self.set_auth_token(None);
        self
    }

    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    /// This scenario's fixture generator.
    pub fn generator(&mut self) -> &mut DataGenerator {
        &mut self.generator
    }

    /// Headers for the next request.
    ///
    /// The auth header is omitted when the scenario has no token.
    pub fn request_headers(&self) -> Result<HeaderMap, ScenarioError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, header_value(CONTENT_TYPE.as_str(), &self.config.content_type)?);
        headers.insert(ACCEPT, header_value(ACCEPT.as_str(), &self.config.content_type)?);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = &self.auth_token {
            let name = header_name(&self.config.auth_header)?;
            let value = header_value(&self.config.auth_header, &self.config.auth_value(token))?;
            headers.insert(name, value);
        }

        let name = header_name(&self.config.correlation_id_header)?;
        headers.insert(name, header_value(&self.config.correlation_id_header, &self.correlation_id)?);
        Ok(headers)
    }

    /// Check that a response echoes this scenario's correlation ID.
    pub fn verify_correlation(&self, response_headers: &HeaderMap) -> Result<(), ScenarioError> {
        let header = &self.config.correlation_id_header;
        let value = response_headers
            .get(header.as_str())
            .ok_or_else(|| ScenarioError::CorrelationMissing {
                header: header.clone(),
            })?;
        let actual = value.to_str().map_err(|e| ScenarioError::InvalidHeader {
            name: header.clone(),
            reason: e.to_string(),
        })?;

        if actual != self.correlation_id {
            warn!(
                expected = %self.correlation_id,
                actual = %actual,
                "Correlation ID mismatch"
            );
            return Err(ScenarioError::CorrelationMismatch {
                expected: self.correlation_id.clone(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Full URL for a resource collection.
    pub fn endpoint(&self, resource: &str) -> String {
        self.config.endpoint(resource)
    }

    /// Full URL for an entity kind's collection.
    pub fn endpoint_for(&self, kind: EntityKind) -> String {
        self.endpoint(kind.resource())
    }
}

fn header_name(name: &str) -> Result<HeaderName, ScenarioError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScenarioError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ScenarioError> {
    HeaderValue::from_str(value).map_err(|e| ScenarioError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
