pub mod error;
pub mod validation;
pub mod value;

pub use error::{IntakeError, Result};
pub use validation::{RuleSet, ValidationError, ValidationOutcome};
pub use value::{FieldValue, RawInput, RawValue};
