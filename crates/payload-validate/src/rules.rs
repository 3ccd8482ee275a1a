//! Per-field validation rules.
//!
//! Every rule is a stateless check from a located value to a [`FieldResult`].
//! An absent or `null` value is always reported as missing. Rules never
//! panic or return errors; failures are expressed in the result.

use crate::config::{DeclaredType, Limits};
use crate::locate::LookupTable;
use crate::report::FieldResult;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::OnceLock;

/// Email shape, matched against the whole string.
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

/// Characters allowed in a phone number: optional leading `+`, digits,
/// whitespace, dashes and parentheses.
pub const PHONE_PATTERN: &str = r"^\+?[0-9\-\s\(\)]+$";

/// Exact shape of an ISO birth date.
pub const ISO_DATE_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

/// Exact shape of a day-first birth date; day and month may be one digit.
pub const DAY_FIRST_DATE_PATTERN: &str = r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$";

// Pre-compiled regex patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
static ISO_DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static DAY_FIRST_DATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).unwrap())
}

fn iso_date_regex() -> &'static Regex {
    ISO_DATE_REGEX.get_or_init(|| Regex::new(ISO_DATE_PATTERN).unwrap())
}

fn day_first_date_regex() -> &'static Regex {
    DAY_FIRST_DATE_REGEX.get_or_init(|| Regex::new(DAY_FIRST_DATE_PATTERN).unwrap())
}

/// Trait for rules that check one located field.
///
/// ## Example
///
/// ```rust
/// use payload_validate::rules::{EmailRule, FieldRule};
/// use serde_json::json;
///
/// let result = EmailRule::new().check(Some(&json!("a@b.co")), "email");
/// assert!(result.valid);
/// ```
pub trait FieldRule: Debug + Send + Sync {
    /// Check the value located for `field`; `None` means it was not found.
    fn check(&self, value: Option<&Value>, field: &str) -> FieldResult;

    /// Get the rule name for logging.
    fn rule_name(&self) -> &'static str;
}

/// Shape test used to find a field by content when no key matches.
pub trait ContentHeuristic: Debug + Send + Sync {
    /// Whether a string value looks like this field.
    fn matches_shape(&self, candidate: &str) -> bool;
}

/// Type tag of a JSON value, as used in error messages.
pub fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn missing(field: &str) -> FieldResult {
    FieldResult::missing(field, format!("missing {field}"))
}

fn expect_str<'v>(value: &'v Value, field: &str) -> Result<&'v str, FieldResult> {
    value.as_str().ok_or_else(|| {
        FieldResult::wrong_type(
            field,
            format!("expected string for {field}, got {}", type_tag(value)),
        )
    })
}

/// Check that each required field was located.
pub fn required_presence<S: AsRef<str>>(
    lookup: &LookupTable<'_>,
    required_fields: &[S],
) -> Vec<FieldResult> {
    required_fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            if lookup.contains(field) {
                FieldResult::pass(field)
            } else {
                FieldResult::missing(field, "missing required field")
            }
        })
        .collect()
}

/// Strict JSON type check for a configured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRule {
    pub expected: DeclaredType,
}

impl TypeRule {
    pub fn new(expected: DeclaredType) -> Self {
        Self { expected }
    }
}

impl FieldRule for TypeRule {
    fn check(&self, value: Option<&Value>, field: &str) -> FieldResult {
        let Some(value) = present(value) else {
            return missing(field);
        };

        let matches = match self.expected {
            DeclaredType::Integer => matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()),
            DeclaredType::String => value.is_string(),
        };

        if matches {
            FieldResult::pass(field)
        } else {
            FieldResult::wrong_type(
                field,
                format!("expected {}, got {}", self.expected, type_tag(value)),
            )
        }
    }

    fn rule_name(&self) -> &'static str {
        "type"
    }
}

/// Minimum-age check on a birth date.
///
/// `today` is part of the rule so results are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRule {
    pub min_age: i32,
    pub today: NaiveDate,
}

impl AgeRule {
    pub fn new(min_age: i32, today: NaiveDate) -> Self {
        Self { min_age, today }
    }

    pub fn from_limits(limits: &Limits, today: NaiveDate) -> Self {
        Self::new(limits.min_age, today)
    }

    /// Whole years between `birth` and `today`.
    pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
        let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
        today.year() - birth.year() - i32::from(before_birthday)
    }

    /// Parse `YYYY-MM-DD`, falling back to `DD/MM/YYYY`.
    ///
    /// The whole string must have one of those shapes; chrono alone would
    /// also take signs, short years and surrounding whitespace.
    pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
        if iso_date_regex().is_match(raw) {
            if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                return Some(date);
            }
        }
        if day_first_date_regex().is_match(raw) {
            return NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok();
        }
        None
    }

    /// Check an already-parsed birth date.
    pub fn check_date(&self, birth: NaiveDate, field: &str) -> FieldResult {
        if Self::age_on(birth, self.today) >= self.min_age {
            FieldResult::pass(field)
        } else {
            FieldResult::format(
                field,
                format!("must be at least {} years old", self.min_age),
            )
        }
    }
}

impl FieldRule for AgeRule {
    fn check(&self, value: Option<&Value>, field: &str) -> FieldResult {
        let Some(value) = present(value) else {
            return missing(field);
        };
        let Some(raw) = value.as_str() else {
            return FieldResult::wrong_type(
                field,
                format!("unsupported {field} type, got {}", type_tag(value)),
            );
        };

        match Self::parse_birth_date(raw) {
            Some(birth) => self.check_date(birth, field),
            None => FieldResult::format(field, "invalid date format, expected YYYY-MM-DD"),
        }
    }

    fn rule_name(&self) -> &'static str {
        "age"
    }
}

/// Email format rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmailRule;

impl EmailRule {
    pub fn new() -> Self {
        Self
    }
}

impl FieldRule for EmailRule {
    fn check(&self, value: Option<&Value>, field: &str) -> FieldResult {
        let Some(value) = present(value) else {
            return missing(field);
        };
        let email = match expect_str(value, field) {
            Ok(email) => email,
            Err(result) => return result,
        };

        if email_regex().is_match(email) {
            FieldResult::pass(field)
        } else {
            FieldResult::format(field, "invalid email format")
        }
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}

impl ContentHeuristic for EmailRule {
    fn matches_shape(&self, candidate: &str) -> bool {
        email_regex().is_match(candidate)
    }
}

/// Phone number rule: allowed characters, then digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneRule {
    pub min_digits: usize,
    pub max_digits: usize,
}

impl PhoneRule {
    pub fn new(min_digits: usize, max_digits: usize) -> Self {
        Self {
            min_digits,
            max_digits,
        }
    }

    pub fn from_limits(limits: &Limits) -> Self {
        Self::new(limits.phone_min_digits, limits.phone_max_digits)
    }

    /// Count the ASCII digits in `raw`, ignoring everything else.
    pub fn digit_count(raw: &str) -> usize {
        raw.chars().filter(char::is_ascii_digit).count()
    }

    fn digits_in_range(&self, raw: &str) -> bool {
        (self.min_digits..=self.max_digits).contains(&Self::digit_count(raw))
    }
}

impl Default for PhoneRule {
    fn default() -> Self {
        Self::from_limits(&Limits::default())
    }
}

impl FieldRule for PhoneRule {
    fn check(&self, value: Option<&Value>, field: &str) -> FieldResult {
        let Some(value) = present(value) else {
            return missing(field);
        };
        let phone = match expect_str(value, field) {
            Ok(phone) => phone,
            Err(result) => return result,
        };

        if !phone_regex().is_match(phone) {
            return FieldResult::format(field, "invalid characters in phone number");
        }
        if !self.digits_in_range(phone) {
            return FieldResult::format(field, "phone number has invalid length");
        }

        FieldResult::pass(field)
    }

    fn rule_name(&self) -> &'static str {
        "phone"
    }
}

impl ContentHeuristic for PhoneRule {
    fn matches_shape(&self, candidate: &str) -> bool {
        self.digits_in_range(candidate)
    }
}
