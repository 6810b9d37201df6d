//! Validation boundary types.
//!
//! The core does not interpret validation rules. It hands the raw input and
//! an opaque rule set to an external validator and, when that validator
//! reports failure, raises a [`ValidationError`] carrying every failing
//! field so the caller can surface them all at once.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-field rule text, interpreted entirely by the external validator.
///
/// The rule syntax is not defined here; a rule string is carried through
/// uninterpreted.
pub type RuleSet = BTreeMap<String, String>;

/// What the external validator reports back for one input mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether any rule failed.
    pub failed: bool,
    /// Ordered human-readable messages per failing field.
    pub messages: BTreeMap<String, Vec<String>>,
}

impl ValidationOutcome {
    /// An outcome with no failures.
    pub fn passed() -> Self {
        Self::default()
    }

    /// An outcome carrying the given per-field failure messages.
    pub fn failed(messages: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            failed: true,
            messages,
        }
    }
}

/// Raised when validation fails; carries the complete field-to-messages
/// mapping, not just a summary string.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
    field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new(field_errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            message: "Validation Failed".to_string(),
            source: None,
            field_errors,
        }
    }

    /// Override the summary message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: Box<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }

    /// The messages per failing field, for programmatic consumption.
    pub fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.field_errors
    }
}
