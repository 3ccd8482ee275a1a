//! Environment-driven settings.
//!
//! Values come from `PAYLOAD_VALIDATE_*` variables, optionally seeded from a
//! `.env` file. Command-line flags take precedence over these.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix shared by all environment variables read here.
pub const ENV_PREFIX: &str = "PAYLOAD_VALIDATE_";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rules file used when `--rules` is not given (`PAYLOAD_VALIDATE_RULES`)
    pub rules: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset (`PAYLOAD_VALIDATE_LOG`)
    pub log: Option<String>,
}

impl Settings {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Pick the rules file: explicit flag first, then the environment.
    pub fn rules_path<'a>(&'a self, flag: Option<&'a Path>) -> Option<&'a Path> {
        flag.or(self.rules.as_deref())
    }
}

/// Load variables from a `.env` file in the current directory, if any.
///
/// Existing environment variables take precedence.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}
