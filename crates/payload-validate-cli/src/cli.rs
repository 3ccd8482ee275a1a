//! CLI argument parsing

use crate::commands::{self, CheckArgs, RulesArgs};
use crate::settings::Settings;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Validate heterogeneous JSON payloads against a rule set
#[derive(Parser, Debug)]
#[command(name = "payload-validate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON document and print the report
    Check(CheckArgs),

    /// Print the effective rule set
    Rules(RulesArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self, settings: &Settings) -> anyhow::Result<ExitCode> {
        match self.command {
            Commands::Check(args) => commands::check(args, settings),
            Commands::Rules(args) => commands::rules(args, settings),
        }
    }
}
