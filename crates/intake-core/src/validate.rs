//! External validator boundary.
//!
//! The core ships no rule engine. A [`Validator`] implementation receives
//! the raw input and the opaque rule set and reports pass/fail plus the
//! per-field failure messages; see [`Normalizer::validate`] for how a
//! failed outcome is raised to the caller.
//!
//! [`Normalizer::validate`]: crate::Normalizer::validate

use intake_model::{RawInput, RuleSet, ValidationOutcome};

/// The external validation collaborator contract.
pub trait Validator {
    /// Evaluate the rule set against the raw input. Must be side-effect
    /// free with respect to both arguments.
    fn check(&self, input: &RawInput, rules: &RuleSet) -> ValidationOutcome;
}
