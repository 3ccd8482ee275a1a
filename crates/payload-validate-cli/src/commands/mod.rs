//! CLI commands

mod check;
mod rules;

pub use check::{check, CheckArgs};
pub use rules::{rules, RulesArgs};

use anyhow::{Context, Result};
use payload_validate::RuleConfig;
use std::path::Path;
use tracing::debug;

/// Load the rule set from `path`, or fall back to the defaults.
fn load_rules(path: Option<&Path>) -> Result<RuleConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading rules");
            RuleConfig::from_path(path)
                .with_context(|| format!("could not load rules from {}", path.display()))
        }
        None => Ok(RuleConfig::default()),
    }
}
