//! Uniform indexed access over a normalizer's raw input.

use intake_model::{FieldValue, RawValue, Result};

/// Explicit has/get/set/remove surface over the raw input mapping.
///
/// `get` resolves through the full precedence chain; `set` and `remove`
/// mutate the raw input directly. `has` reports true for a declared
/// checkbox even when it was not submitted.
pub trait FieldAccess {
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Result<FieldValue>;
    fn set(&mut self, key: &str, value: RawValue);
    fn remove(&mut self, key: &str) -> Option<RawValue>;
}
