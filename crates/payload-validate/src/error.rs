//! Error types for rule configuration loading.
//!
//! The engine itself never fails: every problem with a document is reported
//! as a [`FieldResult`](crate::FieldResult). These errors only cover building
//! a [`RuleConfig`](crate::RuleConfig) from external input.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading or checking a rule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rules file could not be read.
    #[error("failed to read rules file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rules document is not valid JSON or does not match the schema.
    #[error("malformed rules: {0}")]
    Parse(#[from] serde_json::Error),

    /// The rules parsed but contain values the engine cannot work with.
    #[error("invalid rules: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
