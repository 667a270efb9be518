//! `.env` file loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{ConfigError, DEFAULT_ENVIRONMENT, ENVIRONMENT_ENV_VAR, TEST_ENVIRONMENT_ENV_VAR};

/// Name of the active environment.
///
/// `TEST_ENVIRONMENT`, then `ENVIRONMENT`, then `test`.
pub fn environment_name() -> String {
    [TEST_ENVIRONMENT_ENV_VAR, ENVIRONMENT_ENV_VAR]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Load `environments/.env.<environment>` and `.env` from `dir` into the
/// process environment.
///
/// Variables already set are never overwritten, so the environment-specific
/// file wins over `.env` and both lose to the real environment. Missing
/// files are skipped. Returns the files that were loaded.
pub fn load_env_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let environment = environment_name();
    let candidates = [
        dir.join("environments").join(format!(".env.{}", environment)),
        dir.join(".env"),
    ];

    let mut loaded = Vec::new();
    for path in candidates {
        match dotenvy::from_path(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Loaded env file");
                loaded.push(path);
            }
            Err(e) if e.not_found() => {
                debug!(path = %path.display(), "No env file");
            }
            Err(source) => {
                return Err(ConfigError::EnvFile {
                    path: path.display().to_string(),
                    source,
                });
            }
        }
    }
    Ok(loaded)
}
