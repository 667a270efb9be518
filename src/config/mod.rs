//! Test-run configuration.
//!
//! Everything a scenario needs to reach the mocked banking API: base URL,
//! credentials, header names, timeouts and reporting switches. Loaded once
//! at bootstrap and handed to each [`ScenarioContext`](crate::ScenarioContext).

mod env_files;

pub use env_files::{environment_name, load_env_files};

use std::fmt;
use std::time::Duration;

use http::HeaderName;
use serde::Deserialize;
use tracing::debug;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "banking.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "BANKING_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "BANKING";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "BANKING_LOG";
/// Environment variable selecting the env file set.
pub const TEST_ENVIRONMENT_ENV_VAR: &str = "TEST_ENVIRONMENT";
/// Fallback for [`TEST_ENVIRONMENT_ENV_VAR`].
pub const ENVIRONMENT_ENV_VAR: &str = "ENVIRONMENT";
/// Environment name used when neither variable is set.
pub const DEFAULT_ENVIRONMENT: &str = "test";
/// Environment variables that mark a CI run.
pub const CI_ENV_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "JENKINS_URL"];
/// Unprefixed variables read as configuration, one per [`TestConfig`] field
/// plus the short timeout aliases. Anything else in the process
/// environment is ignored.
pub const LEGACY_ENV_VARS: &[&str] = &[
    "ENVIRONMENT",
    "BASE_URL",
    "AUTH_TOKEN",
    "TIMEOUT",
    "TIMEOUT_SECS",
    "REQUEST_TIMEOUT",
    "REQUEST_TIMEOUT_SECS",
    "RETRY_COUNT",
    "CORRELATION_ID_HEADER",
    "CONTENT_TYPE",
    "AUTH_HEADER",
    "AUTH_PREFIX",
    "PERFORMANCE_THRESHOLD_MS",
    "CONCURRENCY_LIMIT",
    "GENERATE_DYNAMIC_DATA",
    "VALIDATE_SCHEMAS",
    "LOG_REQUESTS",
];
/// Environment names treated as production.
pub const PRODUCTION_ENVIRONMENTS: &[&str] = &["prod", "production", "railway"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Required configuration {0} is not set")]
    Missing(&'static str),

    #[error("Invalid configuration {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Failed to load configuration: {0}")]
    Source(#[from] ::config::ConfigError),

    #[error("Failed to read env file '{path}': {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Settings for one test run against the banking API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// Environment name (test, staging, prod, ...).
    pub environment: String,
    /// Root URL of the API, without trailing resource path.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub auth_token: String,
    /// Overall scenario timeout.
    #[serde(alias = "timeout")]
    pub timeout_secs: u64,
    /// Per-request timeout.
    #[serde(alias = "request_timeout")]
    pub request_timeout_secs: u64,
    /// Retries for transient HTTP failures.
    pub retry_count: u32,
    /// Header carrying the correlation ID in both directions.
    pub correlation_id_header: String,
    pub content_type: String,
    pub auth_header: String,
    pub auth_prefix: String,
    /// Response time above which a performance scenario fails.
    pub performance_threshold_ms: u64,
    /// Maximum concurrent requests in load scenarios.
    pub concurrency_limit: usize,
    pub generate_dynamic_data: bool,
    pub validate_schemas: bool,
    pub log_requests: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            base_url: "http://localhost:8080".to_string(),
            auth_token: "banking-api-key-2024".to_string(),
            timeout_secs: 30,
            request_timeout_secs: 10,
            retry_count: 3,
            correlation_id_header: "X-Correlation-Id".to_string(),
            content_type: "application/json".to_string(),
            auth_header: "Authorization".to_string(),
            auth_prefix: "Bearer".to_string(),
            performance_threshold_ms: 2000,
            concurrency_limit: 5,
            generate_dynamic_data: true,
            validate_schemas: true,
            log_requests: false,
        }
    }
}

impl TestConfig {
    /// Load configuration from env files, config files and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `.env` and `environments/.env.<environment>` in the current directory
    /// 2. `banking.yaml` in current directory (if exists)
    /// 3. File specified by `BANKING_CONFIG` environment variable (if set)
    /// 4. Environment variables with `BANKING__` prefix
    /// 5. Unprefixed environment variables listed in [`LEGACY_ENV_VARS`]
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files(std::path::Path::new("."))?;
        Self::from_sources()
    }

    /// Build from config files and the process environment only.
    pub fn from_sources() -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            debug!(path = %config_path, "Loading configuration file");
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .add_source(
                Environment::default()
                    .source(Some(legacy_env()))
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check the values every scenario depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("BASE_URL"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "BASE_URL",
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing("AUTH_TOKEN"));
        }
        for (field, name) in [
            ("CORRELATION_ID_HEADER", &self.correlation_id_header),
            ("AUTH_HEADER", &self.auth_header),
        ] {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            })?;
        }
        if self.concurrency_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "CONCURRENCY_LIMIT",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        PRODUCTION_ENVIRONMENTS.contains(&self.environment.to_ascii_lowercase().as_str())
    }

    /// True under a CI runner or in the `test` environment.
    pub fn is_ci(&self) -> bool {
        CI_ENV_VARS.iter().any(|var| std::env::var_os(var).is_some())
            || self.environment == DEFAULT_ENVIRONMENT
    }

    /// Full URL of a resource collection, e.g. `accounts` or `term-deposits`.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn performance_threshold(&self) -> Duration {
        Duration::from_millis(self.performance_threshold_ms)
    }

    /// Value of the auth header, `<prefix> <token>`.
    pub fn auth_value(&self, token: &str) -> String {
        format!("{} {}", self.auth_prefix, token)
    }
}

/// Token with all but the last four characters masked.
fn redact(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    match chars.len() {
        0 => "Not Set".to_string(),
        n if n <= 4 => "*".repeat(n),
        n => {
            let tail: String = chars[n - 4..].iter().collect();
            format!("{}{}", "*".repeat(n - 4), tail)
        }
    }
}

/// The [`LEGACY_ENV_VARS`] present in the process environment.
fn legacy_env() -> ::config::Map<String, String> {
    std::env::vars()
        .filter(|(key, _)| LEGACY_ENV_VARS.contains(&key.as_str()))
        .collect()
}

impl fmt::Display for TestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Banking API Test Configuration:")?;
        writeln!(f, "    Environment: {}", self.environment)?;
        writeln!(f, "    Base URL: {}", self.base_url)?;
        writeln!(f, "    Auth Token: {}", redact(&self.auth_token))?;
        writeln!(f, "    Timeout: {}s", self.timeout_secs)?;
        writeln!(f, "    Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "    Retry Count: {}", self.retry_count)?;
        writeln!(
            f,
            "    Performance Threshold: {}ms",
            self.performance_threshold_ms
        )?;
        writeln!(f, "    Validate Schemas: {}", self.validate_schemas)?;
        write!(f, "    CI Environment: {}", self.is_ci())
    }
}
