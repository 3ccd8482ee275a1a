//! Rules command: print the effective rule set

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::settings::Settings;

/// Arguments for the `rules` command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rules file (JSON); defaults to PAYLOAD_VALIDATE_RULES or the built-in rules
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
}

/// Print the rules as JSON, including the fixed email and phone patterns.
pub fn rules(args: RulesArgs, settings: &Settings) -> Result<ExitCode> {
    let config = super::load_rules(settings.rules_path(args.rules.as_deref()))?;
    println!("{}", serde_json::to_string_pretty(&config.catalog())?);
    Ok(ExitCode::SUCCESS)
}
