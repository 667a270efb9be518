//! Bootstrap utilities for test harnesses and the fixture binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, TestConfig, LOG_ENV_VAR};

/// Initialize tracing with BANKING_LOG environment variable.
///
/// Defaults to "info" level if BANKING_LOG is not set. Safe to call from
/// every scenario runner: only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Load and validate the run configuration, logging the redacted result.
pub fn load_config() -> Result<TestConfig, ConfigError> {
    let config = TestConfig::load()?;
    config.validate()?;
    tracing::info!(
        environment = %config.environment,
        base_url = %config.base_url,
        production = config.is_production(),
        "Loaded test configuration"
    );
    tracing::debug!("{}", config);
    Ok(config)
}
