//! Field resolution and whole-input transformation.
//!
//! A [`Normalizer`] owns one raw input mapping and resolves each requested
//! field through a fixed precedence chain:
//!
//! 1. a registered accessor override (computed/derived fields),
//! 2. the checkbox rule (presence in the input means checked),
//! 3. the date rule (display string parsed via [`DateConverter`]),
//! 4. verbatim passthrough of the raw value,
//! 5. otherwise an unknown-attribute error.
//!
//! Checkbox semantics follow the way HTML forms encode them: an unchecked
//! box is simply absent from the submission, so presence alone decides the
//! state and the stored value is ignored.

use std::collections::{BTreeMap, BTreeSet};

use intake_model::{
    FieldValue, IntakeError, RawInput, RawValue, Result, RuleSet, ValidationError,
};

use crate::access::FieldAccess;
use crate::date::DateConverter;
use crate::validate::Validator;

/// Handler computing a field's value instead of reading the input directly.
///
/// Accessors receive the raw input so they can post-process stored values
/// or combine several of them into a derived field.
pub type AccessorFn = Box<dyn Fn(&RawInput) -> Result<FieldValue>>;

/// Produces the rule set handed to the validator; the flag distinguishes
/// update validation from first-entry validation.
pub type RulesFn = Box<dyn Fn(bool) -> RuleSet>;

/// The two values a resolved checkbox can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxStates {
    pub checked: FieldValue,
    pub unchecked: FieldValue,
}

impl Default for CheckboxStates {
    fn default() -> Self {
        Self {
            checked: FieldValue::Flag(true),
            unchecked: FieldValue::Flag(false),
        }
    }
}

/// Resolves raw form fields into application-ready values.
///
/// Construct via [`Normalizer::builder`]; the checkbox and date field sets
/// are fixed once built, while the raw input itself stays mutable through
/// the [`FieldAccess`] surface.
pub struct Normalizer {
    input: RawInput,
    checkboxes: BTreeSet<String>,
    dates: BTreeSet<String>,
    checkbox_states: CheckboxStates,
    converter: DateConverter,
    accessors: BTreeMap<String, AccessorFn>,
    rules: Option<RulesFn>,
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn builder(input: RawInput) -> NormalizerBuilder {
        NormalizerBuilder {
            input,
            checkboxes: BTreeSet::new(),
            dates: BTreeSet::new(),
            checkbox_states: CheckboxStates::default(),
            converter: DateConverter::new(),
            accessors: BTreeMap::new(),
            rules: None,
        }
    }

    /// The raw input as currently held.
    pub fn input(&self) -> &RawInput {
        &self.input
    }

    /// Resolve a single field name to its application-level value.
    pub fn resolve(&self, key: &str) -> Result<FieldValue> {
        if let Some(accessor) = self.accessors.get(key) {
            return accessor(&self.input);
        }

        if self.checkboxes.contains(key) {
            // Presence decides the state; the stored value is ignored, so
            // falsy text like "0" still means checked.
            let state = if self.input.contains_key(key) {
                &self.checkbox_states.checked
            } else {
                &self.checkbox_states.unchecked
            };
            return Ok(state.clone());
        }

        if self.dates.contains(key) {
            let text = match self.input.get(key) {
                Some(raw) => raw.display_text(),
                // An unsubmitted date field reads the same as an empty one.
                None => String::new(),
            };
            return Ok(match self.converter.to_date(&text)? {
                Some(date) => FieldValue::Date(date),
                None => FieldValue::Null,
            });
        }

        match self.input.get(key) {
            Some(raw) => Ok(raw.clone().into()),
            None => Err(IntakeError::UnknownAttribute(key.to_string())),
        }
    }

    /// Transform the whole input into a storage-ready mapping.
    ///
    /// Every non-checkbox input field is resolved under its own name, then
    /// every declared checkbox is resolved whether submitted or not, so the
    /// output carries exactly one entry per checkbox. Any resolution
    /// failure aborts the pass; no partial output is returned.
    pub fn transform_all(&self) -> Result<BTreeMap<String, FieldValue>> {
        tracing::debug!(
            fields = self.input.len(),
            checkboxes = self.checkboxes.len(),
            "transforming raw input"
        );

        let mut output = BTreeMap::new();
        for key in self.input.keys() {
            if !self.checkboxes.contains(key) {
                output.insert(key.to_string(), self.resolve(key)?);
            }
        }
        for name in &self.checkboxes {
            output.insert(name.clone(), self.resolve(name)?);
        }
        Ok(output)
    }

    /// Run the external validator over the raw input.
    ///
    /// The rule set comes from the configured rules provider (empty when
    /// none was registered) and may differ between first entry and update.
    /// On failure the complete field-to-messages mapping is raised; the
    /// input is never partially accepted.
    pub fn validate<V>(
        &self,
        validator: &V,
        for_update: bool,
    ) -> std::result::Result<(), ValidationError>
    where
        V: Validator + ?Sized,
    {
        let rules = match &self.rules {
            Some(provider) => provider(for_update),
            None => RuleSet::new(),
        };
        let outcome = validator.check(&self.input, &rules);
        if outcome.failed {
            tracing::debug!(
                failing_fields = outcome.messages.len(),
                for_update,
                "validation failed"
            );
            return Err(ValidationError::new(outcome.messages));
        }
        Ok(())
    }
}

impl FieldAccess for Normalizer {
    /// A declared checkbox "exists" even when unchecked, since its resolved
    /// value is always defined.
    fn has(&self, key: &str) -> bool {
        self.input.contains_key(key) || self.checkboxes.contains(key)
    }

    fn get(&self, key: &str) -> Result<FieldValue> {
        self.resolve(key)
    }

    fn set(&mut self, key: &str, value: RawValue) {
        self.input.insert(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.input.remove(key)
    }
}

/// Builder for [`Normalizer`].
pub struct NormalizerBuilder {
    input: RawInput,
    checkboxes: BTreeSet<String>,
    dates: BTreeSet<String>,
    checkbox_states: CheckboxStates,
    converter: DateConverter,
    accessors: BTreeMap<String, AccessorFn>,
    rules: Option<RulesFn>,
}

impl NormalizerBuilder {
    /// Declare the checkbox field names.
    pub fn checkboxes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checkboxes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare the date field names.
    pub fn dates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates.extend(names.into_iter().map(Into::into));
        self
    }

    /// Override the values emitted for checked/unchecked checkboxes.
    pub fn checkbox_states(mut self, states: CheckboxStates) -> Self {
        self.checkbox_states = states;
        self
    }

    /// Override the date display format.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.converter = DateConverter::with_format(format);
        self
    }

    /// Register an accessor override for a field name.
    ///
    /// Overrides win over every other resolution rule and may compute
    /// fields that do not exist in the raw input at all.
    pub fn accessor<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&RawInput) -> Result<FieldValue> + 'static,
    {
        self.accessors.insert(name.into(), Box::new(accessor));
        self
    }

    /// Register the validation rules provider.
    pub fn rules<F>(mut self, provider: F) -> Self
    where
        F: Fn(bool) -> RuleSet + 'static,
    {
        self.rules = Some(Box::new(provider));
        self
    }

    /// Finish the build, rejecting any field declared both checkbox and
    /// date (the checkbox rule would shadow the date rule).
    pub fn build(self) -> Result<Normalizer> {
        if let Some(name) = self.checkboxes.intersection(&self.dates).next() {
            return Err(IntakeError::ConflictingField(name.clone()));
        }

        Ok(Normalizer {
            input: self.input,
            checkboxes: self.checkboxes,
            dates: self.dates,
            checkbox_states: self.checkbox_states,
            converter: self.converter,
            accessors: self.accessors,
            rules: self.rules,
        })
    }
}
