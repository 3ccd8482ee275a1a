//! Check command: validate one document

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use console::{style, Emoji};
use payload_validate::{ValidationEngine, ValidationReport};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::settings::Settings;

static PASS: Emoji<'_, '_> = Emoji("✅ ", "+ ");
static FAIL: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Exit status when the document fails validation.
const EXIT_INVALID: u8 = 1;

/// Report output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The report as pretty-printed JSON
    #[default]
    Json,
    /// One line per field
    Text,
}

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON document to validate, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Rules file (JSON); defaults to PAYLOAD_VALIDATE_RULES or the built-in rules
    #[arg(short, long)]
    pub rules: Option<PathBuf>,

    /// Evaluate age rules as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Validate a document and print the report.
///
/// Exits with status 1 when the document is invalid.
pub fn check(args: CheckArgs, settings: &Settings) -> Result<ExitCode> {
    let config = super::load_rules(settings.rules_path(args.rules.as_deref()))?;
    let document = read_document(&args.input)?;
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let engine = ValidationEngine::new(config);
    let report = engine.validate(&document, today);
    info!(
        input = %args.input.display(),
        valid = report.valid,
        fields = report.errors.len(),
        "document checked"
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

fn read_document(input: &Path) -> Result<Value> {
    let raw = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", input.display()))
}

fn print_text(report: &ValidationReport) {
    for result in &report.errors {
        match result.error() {
            None => println!("{}{}", PASS, style(&result.field).bold()),
            Some(error) => println!(
                "{}{} {}",
                FAIL,
                style(&result.field).bold(),
                style(error).red()
            ),
        }
    }

    let summary = report.to_string();
    if report.valid {
        println!("{}", style(summary).green());
    } else {
        println!("{}", style(summary).red());
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected a date as YYYY-MM-DD: {e}"))
}
