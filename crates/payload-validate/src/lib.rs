//! # payload-validate
//!
//! Validation of JSON payloads whose field names and nesting vary between
//! producers. Fields are addressed by a canonical name and found anywhere in
//! the document, by alias or, for email and phone, by the shape of the value.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use payload_validate::prelude::*;
//! use serde_json::json;
//!
//! let config = RuleConfig::new().with_required(["email"]);
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let document = json!({
//!     "person": {"dateOfBirth": "2010-03-14"},
//!     "contact": {"mobile": "+1 (555) 123-4567"}
//! });
//!
//! let report = validate_payload(&document, &config, today);
//! assert!(!report.valid);
//! assert_eq!(report.get("email").unwrap().error(), Some("missing required field"));
//! assert_eq!(report.get("birthDate").unwrap().error(), Some("must be at least 18 years old"));
//! assert!(report.get("phone").unwrap().valid);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`build_lookup`] locates each canonical field (required fields, typed
//!    fields, then `birthDate`, `email`, `phone`).
//! 2. Rules from [`rules`] check the located values.
//! 3. [`merge_results`] keeps one result per field, failures first.
//!
//! ## Output Format
//!
//! ```json
//! {
//!   "valid": false,
//!   "errors": [
//!     {"field": "email", "valid": false, "error": "missing required field"},
//!     {"field": "phone", "valid": true, "error": null}
//!   ]
//! }
//! ```

mod config;
mod engine;
mod error;
mod merge;
mod report;

pub mod locate;
pub mod rules;


pub use config::{
    DeclaredType, DomainField, FieldAliases, Limits, RuleCatalog, RuleConfig, DEFAULT_MIN_AGE,
    DEFAULT_PHONE_MAX_DIGITS, DEFAULT_PHONE_MIN_DIGITS,
};
pub use engine::{build_lookup, validate_payload, ValidationEngine};
pub use error::ConfigError;
pub use locate::{LookupTable, MAX_DEPTH};
pub use merge::merge_results;
pub use report::{FailureKind, FieldResult, ValidationReport};

/// Prelude module for validation
pub mod prelude {
    pub use crate::config::{DeclaredType, DomainField, RuleConfig};
    pub use crate::engine::{validate_payload, ValidationEngine};
    pub use crate::error::ConfigError;
    pub use crate::report::{FailureKind, FieldResult, ValidationReport};
}
