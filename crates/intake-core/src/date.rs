//! Conversion between display date strings and calendar dates.
//!
//! Form input carries dates as display strings in one configured format
//! (default day/month/4-digit-year, e.g. `31/12/2024`). Conversion is
//! strict: a non-empty string either matches the format exactly or fails.
//! The empty string means "no date" in both directions.

use chrono::NaiveDate;

use intake_model::{IntakeError, Result};

/// Default display format: day/month/4-digit-year.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Stateless converter between display strings and [`NaiveDate`] values,
/// sharing one configured format for both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConverter {
    format: String,
}

impl Default for DateConverter {
    fn default() -> Self {
        Self {
            format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom chrono format string for both directions.
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Format a date for display. A missing date yields the empty string.
    pub fn to_display_string(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(date) => date.format(&self.format).to_string(),
            None => String::new(),
        }
    }

    /// Parse a display string into a date.
    ///
    /// The empty string yields `None`; any other value must match the
    /// configured format exactly.
    pub fn to_date(&self, value: &str) -> Result<Option<NaiveDate>> {
        if value.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(value, &self.format)
            .map(Some)
            .map_err(|source| IntakeError::DateParse {
                value: value.to_string(),
                format: self.format.clone(),
                source,
            })
    }
}
