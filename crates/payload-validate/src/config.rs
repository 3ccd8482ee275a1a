//! Rule configuration consumed by the validation engine.
//!
//! A [`RuleConfig`] is built once (from defaults or a JSON rules file) and
//! then shared read-only, usually behind an `Arc`. There is no mutation API;
//! swapping rules means swapping the whole `Arc`.

use crate::error::ConfigError;
use crate::rules::{EMAIL_PATTERN, PHONE_PATTERN};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Minimum age accepted by the age rule.
pub const DEFAULT_MIN_AGE: i32 = 18;

/// Lower bound on the number of digits in a phone number.
pub const DEFAULT_PHONE_MIN_DIGITS: usize = 7;

/// Upper bound on the number of digits in a phone number.
pub const DEFAULT_PHONE_MAX_DIGITS: usize = 15;

/// JSON type a configured field must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    /// A JSON number without a fractional part
    #[serde(alias = "int")]
    Integer,
    /// A JSON string
    #[serde(alias = "str")]
    String,
}

impl DeclaredType {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that have a dedicated domain rule and an alias list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainField {
    BirthDate,
    Email,
    Phone,
}

impl DomainField {
    /// All domain fields, in the order their rules run.
    pub const ALL: [DomainField; 3] = [Self::BirthDate, Self::Email, Self::Phone];

    /// Canonical name the field is reported under.
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::BirthDate => "birthDate",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Resolve a canonical name back to its domain field.
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.canonical_name() == name)
    }

    fn default_aliases(&self) -> Vec<String> {
        let aliases: &[&str] = match self {
            Self::BirthDate => &["birthDate", "dateOfBirth", "dob"],
            Self::Email => &["email", "emailAddress", "emailAddr"],
            Self::Phone => &["phone", "phoneNumber", "mobile", "PrimaryPhone"],
        };
        aliases.iter().map(|a| a.to_string()).collect()
    }
}

/// Numeric thresholds used by the domain rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Limits {
    pub min_age: i32,
    pub phone_min_digits: usize,
    pub phone_max_digits: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            phone_min_digits: DEFAULT_PHONE_MIN_DIGITS,
            phone_max_digits: DEFAULT_PHONE_MAX_DIGITS,
        }
    }
}

/// Key names accepted for each domain field, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldAliases {
    pub birth_date: Vec<String>,
    pub email: Vec<String>,
    pub phone: Vec<String>,
}

impl FieldAliases {
    /// Aliases for one domain field.
    pub fn for_field(&self, field: DomainField) -> &[String] {
        match field {
            DomainField::BirthDate => &self.birth_date,
            DomainField::Email => &self.email,
            DomainField::Phone => &self.phone,
        }
    }
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            birth_date: DomainField::BirthDate.default_aliases(),
            email: DomainField::Email.default_aliases(),
            phone: DomainField::Phone.default_aliases(),
        }
    }
}

/// Validation rules applied to every document.
///
/// ## Example
///
/// ```rust
/// use payload_validate::{DeclaredType, RuleConfig};
///
/// let config = RuleConfig::new()
///     .with_required(["email", "name"])
///     .with_type("age", DeclaredType::Integer);
///
/// assert_eq!(config.required_fields(), ["email", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleConfig {
    required_fields: Vec<String>,
    types: IndexMap<String, DeclaredType>,
    limits: Limits,
    aliases: FieldAliases,
}

impl RuleConfig {
    /// Create the default rule set: no required or typed fields, standard
    /// thresholds and aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add required field names.
    pub fn with_required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Declare the expected type of a field.
    pub fn with_type(mut self, field: impl Into<String>, expected: DeclaredType) -> Self {
        self.types.insert(field.into(), expected);
        self
    }

    /// Replace the thresholds.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the alias list of a domain field.
    pub fn with_aliases<I, S>(mut self, field: DomainField, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases = aliases.into_iter().map(Into::into).collect();
        match field {
            DomainField::BirthDate => self.aliases.birth_date = aliases,
            DomainField::Email => self.aliases.email = aliases,
            DomainField::Phone => self.aliases.phone = aliases,
        }
        self
    }

    /// Parse and check a JSON rules document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.check()?;
        Ok(config)
    }

    /// Read, parse and check a JSON rules file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Fields that must be present somewhere in the document.
    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Declared field types, in declaration order.
    pub fn types(&self) -> &IndexMap<String, DeclaredType> {
        &self.types
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn aliases(&self) -> &FieldAliases {
        &self.aliases
    }

    /// Describe the effective rules, including the fixed patterns.
    pub fn catalog(&self) -> RuleCatalog<'_> {
        RuleCatalog {
            config: self,
            email_pattern: EMAIL_PATTERN,
            phone_pattern: PHONE_PATTERN,
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        let mut names = self.required_fields.iter().chain(self.types.keys());
        if names.any(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid("field names must not be empty"));
        }

        let limits = &self.limits;
        if limits.phone_min_digits == 0 || limits.phone_min_digits > limits.phone_max_digits {
            return Err(ConfigError::invalid(format!(
                "phone digit bounds must satisfy 1 <= min <= max, got [{}, {}]",
                limits.phone_min_digits, limits.phone_max_digits
            )));
        }
        if limits.min_age < 0 {
            return Err(ConfigError::invalid(format!(
                "minimum age must not be negative, got {}",
                limits.min_age
            )));
        }

        for field in DomainField::ALL {
            if self.aliases.for_field(field).is_empty() {
                return Err(ConfigError::invalid(format!(
                    "alias list for {} must not be empty",
                    field.canonical_name()
                )));
            }
        }

        Ok(())
    }
}

/// Serializable description of a rule set, as listed by the CLI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCatalog<'a> {
    #[serde(flatten)]
    config: &'a RuleConfig,
    email_pattern: &'static str,
    phone_pattern: &'static str,
}
