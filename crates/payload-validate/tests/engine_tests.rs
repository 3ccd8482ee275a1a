//! Integration tests for the validation engine.
//!
//! These tests drive documents through the public API the way a transport
//! layer would: a rule set, a JSON body and an explicit date.

use chrono::NaiveDate;
use payload_validate::prelude::*;
use payload_validate::{DeclaredType, Limits};
use serde_json::{json, Value};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn validate(doc: &Value) -> ValidationReport {
    validate_payload(doc, &RuleConfig::default(), today())
}

#[test]
fn empty_document_is_vacuously_valid() {
    let report = validate(&json!({}));
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn required_field_missing() {
    let config = RuleConfig::new().with_required(["email"]);
    let report = validate_payload(&json!({}), &config, today());

    assert!(!report.valid);
    assert_eq!(
        report.errors,
        vec![FieldResult::missing("email", "missing required field")]
    );
}

#[test]
fn age_boundary_through_engine() {
    let adult = validate(&json!({"birthDate": "2006-06-01"}));
    assert!(adult.valid);

    let minor = validate(&json!({"birthDate": "2006-06-02"}));
    assert!(!minor.valid);
    assert_eq!(
        minor.get("birthDate").unwrap().error(),
        Some("must be at least 18 years old")
    );
}

#[test]
fn nested_alias_discovery() {
    let report = validate(&json!({"person": {"dateOfBirth": "1990-01-01"}}));

    let birth = report.get("birthDate").expect("birthDate should be located");
    assert!(birth.valid);
}

#[test]
fn email_format_vs_type_errors() {
    let ok = validate(&json!({"email": "a@b.co"}));
    assert!(ok.valid);

    let bad = validate(&json!({"email": "not-an-email"}));
    assert_eq!(bad.get("email").unwrap().kind, Some(FailureKind::Format));

    let wrong = validate(&json!({"email": ["a@b.co"]}));
    let result = wrong.get("email").unwrap();
    assert_eq!(result.kind, Some(FailureKind::WrongType));
    assert_eq!(result.error(), Some("expected string for email, got array"));
}

#[test]
fn phone_digit_counts() {
    let cases = [
        ("123456", false),
        ("1234567", true),
        ("123456789012345", true),
        ("1234567890123456", false),
    ];

    for (phone, expected) in cases {
        let report = validate(&json!({"phone": phone}));
        assert_eq!(report.valid, expected, "phone {phone}");
    }
}

#[test]
fn phone_character_class_error() {
    let report = validate(&json!({"phone": "abc"}));
    assert_eq!(
        report.get("phone").unwrap().error(),
        Some("invalid characters in phone number")
    );
}

#[test]
fn phone_found_by_content() {
    let report = validate(&json!({"contact": {"primary": "555-123-4567"}}));

    let phone = report.get("phone").expect("phone should be found by content");
    assert!(phone.valid);
}

#[test]
fn email_found_by_content() {
    let report = validate(&json!({"owner": {"reach": "owner@example.com"}}));
    assert!(report.get("email").unwrap().valid);
}

#[test]
fn birth_date_has_no_content_fallback() {
    let report = validate(&json!({"created": "1990-01-01"}));
    assert!(report.get("birthDate").is_none());
}

#[test]
fn null_domain_value_is_missing() {
    let report = validate(&json!({"email": null}));
    let email = report.get("email").unwrap();

    assert_eq!(email.error(), Some("missing email"));
    assert_eq!(email.kind, Some(FailureKind::Missing));
}

#[test]
fn declared_types() {
    let config = RuleConfig::new()
        .with_type("age", DeclaredType::Integer)
        .with_type("name", DeclaredType::String);

    let report = validate_payload(&json!({"age": "30", "name": "Ada"}), &config, today());
    assert_eq!(
        report.get("age").unwrap().error(),
        Some("expected integer, got string")
    );
    assert!(report.get("name").unwrap().valid);
}

#[test]
fn typed_field_found_when_nested() {
    let config = RuleConfig::new().with_type("age", DeclaredType::Integer);
    let report = validate_payload(&json!({"person": {"age": 41}}), &config, today());
    assert!(report.get("age").unwrap().valid);
}

#[test]
fn results_in_first_appearance_order() {
    let config = RuleConfig::new()
        .with_required(["name", "email"])
        .with_type("age", DeclaredType::Integer);

    let doc = json!({
        "name": "Ada",
        "age": 36,
        "profile": {"dob": "1988-12-10", "emailAddress": "ada@example.org"},
        "contact": {"PrimaryPhone": "+44 20 7946 0958"}
    });
    let report = validate_payload(&doc, &config, today());

    let fields: Vec<_> = report.errors.iter().map(|r| r.field.as_str()).collect();
    assert_eq!(fields, ["name", "email", "age", "birthDate", "phone"]);
    assert!(report.valid);
}

#[test]
fn failures_override_passes_for_same_field() {
    let config = RuleConfig::new().with_required(["phone"]);
    let report = validate_payload(&json!({"mobile": "12"}), &config, today());

    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].error(),
        Some("phone number has invalid length")
    );
}

#[test]
fn custom_limits() {
    let limits = Limits {
        min_age: 21,
        ..Limits::default()
    };
    let config = RuleConfig::new().with_limits(limits);

    let report = validate_payload(&json!({"dob": "2004-01-01"}), &config, today());
    assert_eq!(
        report.get("birthDate").unwrap().error(),
        Some("must be at least 21 years old")
    );
}

#[test]
fn custom_aliases() {
    let config = RuleConfig::new().with_aliases(DomainField::Email, ["contactMail"]);

    let report = validate_payload(&json!({"contactMail": "x@y.io"}), &config, today());
    assert!(report.get("email").unwrap().valid);
}

#[test]
fn scalar_and_array_roots() {
    assert!(validate(&json!("just a string")).valid);
    assert!(validate(&json!(null)).valid);

    let report = validate(&json!([{"email": "bad"}]));
    assert!(!report.valid);
}

#[test]
fn deeply_nested_fields_are_reported_missing() {
    let mut doc = json!({"email": "a@b.co"});
    for _ in 0..100 {
        doc = json!({"wrap": doc});
    }

    let config = RuleConfig::new().with_required(["email"]);
    let report = validate_payload(&doc, &config, today());
    assert_eq!(report.get("email").unwrap().kind, Some(FailureKind::Missing));
}

#[test]
fn report_json_shape() {
    let config = RuleConfig::new().with_required(["name"]);
    let report = validate_payload(&json!({"email": "a@b.co"}), &config, today());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        json!({
            "valid": false,
            "errors": [
                {"field": "name", "valid": false, "error": "missing required field"},
                {"field": "email", "valid": true, "error": null}
            ]
        })
    );
}

#[test]
fn engine_shared_across_threads() {
    let engine = ValidationEngine::new(RuleConfig::new().with_required(["email"]));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                let doc = json!({"email": format!("user{i}@example.com")});
                engine.validate(&doc, today()).valid
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
