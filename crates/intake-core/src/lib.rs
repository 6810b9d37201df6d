pub mod access;
pub mod date;
pub mod normalizer;
pub mod validate;

pub use access::FieldAccess;
pub use date::{DEFAULT_DATE_FORMAT, DateConverter};
pub use normalizer::{AccessorFn, CheckboxStates, Normalizer, NormalizerBuilder, RulesFn};
pub use validate::Validator;
