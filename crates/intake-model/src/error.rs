use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    /// A key that is not overridden, not a declared checkbox or date field,
    /// and absent from the raw input.
    #[error("unknown attribute key: {0}")]
    UnknownAttribute(String),
    /// A non-empty date string that does not match the configured format.
    #[error("cannot parse {value:?} as a date with format {format:?}")]
    DateParse {
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A field declared as both a checkbox and a date; the configuration is
    /// ambiguous and is rejected at build time.
    #[error("field {0:?} declared as both checkbox and date")]
    ConflictingField(String),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
