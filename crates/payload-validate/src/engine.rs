//! Validation orchestration: locate, check, merge.

use crate::config::{DomainField, RuleConfig};
use crate::locate::{locate, LookupTable};
use crate::merge::merge_results;
use crate::report::ValidationReport;
use crate::rules::{
    required_presence, AgeRule, ContentHeuristic, EmailRule, FieldRule, PhoneRule, TypeRule,
};
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Shareable handle that validates documents against one rule set.
///
/// Cloning is cheap; the rules sit behind an `Arc` and are never mutated,
/// so one engine can serve any number of threads.
///
/// ## Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use payload_validate::{RuleConfig, ValidationEngine};
/// use serde_json::json;
///
/// let engine = ValidationEngine::new(RuleConfig::default());
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let report = engine.validate(&json!({"contact": {"emailAddress": "a@b.co"}}), today);
/// assert!(report.valid);
/// assert_eq!(report.errors[0].field, "email");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    config: Arc<RuleConfig>,
}

impl ValidationEngine {
    pub fn new(config: impl Into<Arc<RuleConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Validate `document`, evaluating age rules as of `today`.
    pub fn validate(&self, document: &Value, today: NaiveDate) -> ValidationReport {
        validate_payload(document, &self.config, today)
    }

    /// Validate `document` against the local calendar date.
    pub fn validate_now(&self, document: &Value) -> ValidationReport {
        self.validate(document, chrono::Local::now().date_naive())
    }
}

/// Locate every canonical field the rules care about.
///
/// Required fields come first, then typed fields, then the domain fields.
/// A required or typed field that is also a domain field is searched with the
/// domain field's aliases and heuristic.
pub fn build_lookup<'a>(document: &'a Value, config: &RuleConfig) -> LookupTable<'a> {
    let email = EmailRule::new();
    let phone = PhoneRule::from_limits(config.limits());

    let names: IndexSet<&str> = config
        .required_fields()
        .iter()
        .map(String::as_str)
        .chain(config.types().keys().map(String::as_str))
        .chain(DomainField::ALL.iter().map(|f| f.canonical_name()))
        .collect();

    let mut lookup = LookupTable::new();
    for name in names {
        let found = match DomainField::from_canonical(name) {
            Some(field) => {
                let heuristic: Option<&dyn ContentHeuristic> = match field {
                    DomainField::BirthDate => None,
                    DomainField::Email => Some(&email),
                    DomainField::Phone => Some(&phone),
                };
                locate(document, name, config.aliases().for_field(field), heuristic)
            }
            None => locate(document, name, &[name], None),
        };

        if let Some(value) = found {
            lookup.insert(name, value);
        }
    }

    lookup
}

/// Validate one document. Total: every problem becomes a field result.
pub fn validate_payload(document: &Value, config: &RuleConfig, today: NaiveDate) -> ValidationReport {
    let lookup = build_lookup(document, config);

    let mut results = required_presence(&lookup, config.required_fields());

    for (field, expected) in config.types() {
        if let Some(value) = lookup.get(field) {
            results.push(TypeRule::new(*expected).check(Some(value), field));
        }
    }

    let age = AgeRule::from_limits(config.limits(), today);
    let email = EmailRule::new();
    let phone = PhoneRule::from_limits(config.limits());
    let domain_rules: [(DomainField, &dyn FieldRule); 3] = [
        (DomainField::BirthDate, &age),
        (DomainField::Email, &email),
        (DomainField::Phone, &phone),
    ];

    for (field, rule) in domain_rules {
        let name = field.canonical_name();
        if let Some(value) = lookup.get(name) {
            let result = rule.check(Some(value), name);
            debug!(field = name, rule = rule.rule_name(), valid = result.valid, "rule checked");
            results.push(result);
        }
    }

    let report = ValidationReport::from_results(merge_results(results));
    debug!(
        valid = report.valid,
        fields = report.errors.len(),
        located = lookup.len(),
        "payload validated"
    );
    report
}
