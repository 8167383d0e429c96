//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TANGERINE_STATE_PATH` - Path to the state file (default:
//!   `tangerine-state.json` in the working directory)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_STATE_FILE: &str = "tangerine-state.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Path to the JSON state file holding all persisted cart state.
    pub state_path: PathBuf,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let state_path = match std::env::var("TANGERINE_STATE_PATH") {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "TANGERINE_STATE_PATH".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(value) => PathBuf::from(value),
            Err(_) => PathBuf::from(DEFAULT_STATE_FILE),
        };

        Ok(Self { state_path })
    }
}
