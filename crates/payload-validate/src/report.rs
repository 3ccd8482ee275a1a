//! Per-field results and the aggregate validation report.

use serde::Serialize;
use std::fmt;

/// Category of a failed check.
///
/// Carried alongside the error text so callers can branch on the failure
/// kind without matching on message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The value is absent or `null`.
    Missing,
    /// The value is present but has the wrong JSON type.
    WrongType,
    /// The value has the right type but breaks a domain rule.
    Format,
}

/// Verdict for a single canonical field.
///
/// Serializes to `{"field": ..., "valid": ..., "error": ...}`; `error` is
/// `null` for passing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    /// Canonical field name
    pub field: String,
    /// Whether the field passed
    pub valid: bool,
    /// Human-readable reason for a failure
    pub error: Option<String>,
    /// Failure category, `None` for passing fields
    #[serde(skip)]
    pub kind: Option<FailureKind>,
}

impl FieldResult {
    /// Create a passing result.
    pub fn pass(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: true,
            error: None,
            kind: None,
        }
    }

    /// Create a failing result of the given kind.
    pub fn fail(field: impl Into<String>, kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            valid: false,
            error: Some(error.into()),
            kind: Some(kind),
        }
    }

    /// Create a "missing" failure.
    pub fn missing(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self::fail(field, FailureKind::Missing, error)
    }

    /// Create a wrong-type failure.
    pub fn wrong_type(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self::fail(field, FailureKind::WrongType, error)
    }

    /// Create a format failure.
    pub fn format(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self::fail(field, FailureKind::Format, error)
    }

    /// Get the error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// True iff every entry in `errors` is valid (vacuously true when empty)
    pub valid: bool,
    /// Merged per-field results, in first-appearance order
    pub errors: Vec<FieldResult>,
}

impl ValidationReport {
    /// Build a report from merged results.
    pub fn from_results(errors: Vec<FieldResult>) -> Self {
        let valid = errors.iter().all(|r| r.valid);
        Self { valid, errors }
    }

    /// Iterate over the failing results only.
    pub fn failures(&self) -> impl Iterator<Item = &FieldResult> {
        self.errors.iter().filter(|r| !r.valid)
    }

    /// Look up the result for a canonical field.
    pub fn get(&self, field: &str) -> Option<&FieldResult> {
        self.errors.iter().find(|r| r.field == field)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "Validation passed: {} field(s) checked", self.errors.len())
        } else {
            write!(
                f,
                "Validation failed: {} field error(s)",
                self.failures().count()
            )
        }
    }
}
