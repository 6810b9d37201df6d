//! Integration tests for field resolution, whole-input transformation, and
//! the validation boundary.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use intake_core::{CheckboxStates, FieldAccess, Normalizer, Validator};
use intake_model::{
    FieldValue, IntakeError, RawInput, RuleSet, ValidationOutcome,
};

fn form(pairs: &[(&str, &str)]) -> RawInput {
    pairs.iter().map(|&(key, value)| (key, value)).collect()
}

#[test]
fn transform_all_converts_every_field() {
    let input = form(&[
        ("name", "Ada Lovelace"),
        ("startDate", "25/12/2024"),
        ("endDate", ""),
    ]);
    let normalizer = Normalizer::builder(input)
        .checkboxes(["subscribed"])
        .dates(["startDate", "endDate"])
        .build()
        .expect("build");

    let output = normalizer.transform_all().expect("transform");
    assert_eq!(output.len(), 4);
    assert_eq!(
        output.get("name"),
        Some(&FieldValue::Text("Ada Lovelace".to_string()))
    );
    assert_eq!(
        output.get("startDate"),
        Some(&FieldValue::Date(
            NaiveDate::from_ymd_opt(2024, 12, 25).expect("valid date")
        ))
    );
    assert_eq!(output.get("endDate"), Some(&FieldValue::Null));
    assert_eq!(output.get("subscribed"), Some(&FieldValue::Flag(false)));
}

#[test]
fn transform_all_emits_each_checkbox_exactly_once() {
    // "terms" arrives both as a raw string and as a declared checkbox; the
    // checkbox rule wins and the field appears once.
    let input = form(&[("terms", "accepted"), ("name", "Ada")]);
    let normalizer = Normalizer::builder(input)
        .checkboxes(["terms", "newsletter"])
        .build()
        .expect("build");

    let output = normalizer.transform_all().expect("transform");
    assert_eq!(output.len(), 3);
    assert_eq!(output.get("terms"), Some(&FieldValue::Flag(true)));
    assert_eq!(output.get("newsletter"), Some(&FieldValue::Flag(false)));
}

#[test]
fn transform_all_aborts_on_malformed_date() {
    let input = form(&[("name", "Ada"), ("startDate", "not-a-date")]);
    let normalizer = Normalizer::builder(input)
        .dates(["startDate"])
        .build()
        .expect("build");

    let err = normalizer.transform_all().expect_err("malformed date");
    assert!(matches!(err, IntakeError::DateParse { .. }));
}

#[test]
fn accessor_computes_derived_field() {
    let input = form(&[("firstName", "Ada"), ("lastName", "Lovelace")]);
    let normalizer = Normalizer::builder(input)
        .accessor("fullName", |input| {
            let first = input
                .get("firstName")
                .map(|raw| raw.display_text())
                .unwrap_or_default();
            let last = input
                .get("lastName")
                .map(|raw| raw.display_text())
                .unwrap_or_default();
            Ok(FieldValue::Text(format!("{first} {last}")))
        })
        .build()
        .expect("build");

    // "fullName" is absent from the raw input; only the override defines it.
    assert_eq!(
        normalizer.resolve("fullName").expect("derived field"),
        FieldValue::Text("Ada Lovelace".to_string())
    );
}

#[test]
fn accessor_post_processes_raw_value() {
    let input = form(&[("email", "  ADA@EXAMPLE.COM ")]);
    let normalizer = Normalizer::builder(input)
        .accessor("email", |input| {
            let raw = input
                .get("email")
                .map(|raw| raw.display_text())
                .unwrap_or_default();
            Ok(FieldValue::Text(raw.trim().to_lowercase()))
        })
        .build()
        .expect("build");

    let output = normalizer.transform_all().expect("transform");
    assert_eq!(
        output.get("email"),
        Some(&FieldValue::Text("ada@example.com".to_string()))
    );
}

#[test]
fn custom_checkbox_states_flow_through_transform() {
    let states = CheckboxStates {
        checked: FieldValue::Text("Y".to_string()),
        unchecked: FieldValue::Text("N".to_string()),
    };
    let normalizer = Normalizer::builder(form(&[("optIn", "on")]))
        .checkboxes(["optIn", "reminders"])
        .checkbox_states(states)
        .build()
        .expect("build");

    let output = normalizer.transform_all().expect("transform");
    assert_eq!(output.get("optIn"), Some(&FieldValue::Text("Y".to_string())));
    assert_eq!(
        output.get("reminders"),
        Some(&FieldValue::Text("N".to_string()))
    );
}

#[test]
fn indexed_access_contract() {
    let mut normalizer = Normalizer::builder(form(&[("name", "Ada")]))
        .checkboxes(["subscribed"])
        .build()
        .expect("build");

    // A declared-but-unchecked checkbox still "exists".
    assert!(normalizer.has("name"));
    assert!(normalizer.has("subscribed"));
    assert!(!normalizer.has("missing"));

    normalizer.set("nickname", "Countess".into());
    assert_eq!(
        normalizer.get("nickname").expect("set field"),
        FieldValue::Text("Countess".to_string())
    );

    normalizer.remove("name");
    assert!(!normalizer.has("name"));
    assert!(matches!(
        normalizer.get("name"),
        Err(IntakeError::UnknownAttribute(_))
    ));
}

#[test]
fn mutation_flows_into_transform() {
    let mut normalizer = Normalizer::builder(form(&[("name", "Ada")]))
        .build()
        .expect("build");
    normalizer.set("role", "mathematician".into());

    let output = normalizer.transform_all().expect("transform");
    assert_eq!(output.len(), 2);
    assert_eq!(
        output.get("role"),
        Some(&FieldValue::Text("mathematician".to_string()))
    );
}

/// Fails every field that has a rule but no value in the input.
struct RequiredFieldsValidator;

impl Validator for RequiredFieldsValidator {
    fn check(&self, input: &RawInput, rules: &RuleSet) -> ValidationOutcome {
        let mut messages = BTreeMap::new();
        for field in rules.keys() {
            if !input.contains_key(field) {
                messages.insert(
                    field.clone(),
                    vec![format!("The {field} field is required.")],
                );
            }
        }
        if messages.is_empty() {
            ValidationOutcome::passed()
        } else {
            ValidationOutcome::failed(messages)
        }
    }
}

#[test]
fn validate_passes_with_satisfied_rules() {
    let normalizer = Normalizer::builder(form(&[("name", "Ada")]))
        .rules(|_for_update| {
            let mut rules = RuleSet::new();
            rules.insert("name".to_string(), "required".to_string());
            rules
        })
        .build()
        .expect("build");

    normalizer
        .validate(&RequiredFieldsValidator, false)
        .expect("validation passes");
}

#[test]
fn validate_raises_full_field_mapping() {
    let normalizer = Normalizer::builder(form(&[("name", "Ada")]))
        .rules(|_for_update| {
            let mut rules = RuleSet::new();
            rules.insert("email".to_string(), "required".to_string());
            rules.insert("password".to_string(), "required".to_string());
            rules
        })
        .build()
        .expect("build");

    let err = normalizer
        .validate(&RequiredFieldsValidator, false)
        .expect_err("validation fails");
    assert_eq!(err.to_string(), "Validation Failed");
    assert_eq!(err.field_errors().len(), 2);
    assert_eq!(
        err.field_errors().get("email"),
        Some(&vec!["The email field is required.".to_string()])
    );
    assert!(err.field_errors().contains_key("password"));
}

#[test]
fn validate_rules_vary_by_update_flag() {
    // First entry requires a password; updates do not.
    let normalizer = Normalizer::builder(form(&[("name", "Ada")]))
        .rules(|for_update| {
            let mut rules = RuleSet::new();
            if !for_update {
                rules.insert("password".to_string(), "required".to_string());
            }
            rules
        })
        .build()
        .expect("build");

    assert!(normalizer.validate(&RequiredFieldsValidator, false).is_err());
    normalizer
        .validate(&RequiredFieldsValidator, true)
        .expect("update rules pass");
}

#[test]
fn validate_with_no_rules_provider_passes() {
    let normalizer = Normalizer::builder(RawInput::new())
        .build()
        .expect("build");
    normalizer
        .validate(&RequiredFieldsValidator, false)
        .expect("empty rule set passes");
}
