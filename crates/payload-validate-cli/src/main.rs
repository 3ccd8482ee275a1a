//! `payload-validate` command-line driver.

mod cli;
mod commands;
mod settings;

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::settings::Settings;

/// Exit status for usage, I/O and configuration errors.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    settings::load_dotenv();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{} {err}", style("error:").red().bold());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    init_tracing(&settings);

    match Cli::parse().execute(&settings) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(settings: &Settings) {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
