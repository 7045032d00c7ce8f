//! Validation errors

use jiff::civil::DateTime;
use thiserror::Error;

/// Errors raised while turning untrusted input into coupons and products.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A name was empty or only whitespace.
    #[error("{field} must not be empty")]
    EmptyName {
        /// Field that was empty.
        field: &'static str,
    },

    /// A monetary amount was negative or too large to store.
    #[error("{field} must be an integer between 0 and {max}, got {value}", max = i64::MAX)]
    AmountOutOfRange {
        /// Field holding the amount.
        field: &'static str,

        /// Rejected value, as given.
        value: String,
    },

    /// Text that does not name a known product category.
    #[error("unknown product category \"{0}\", expected one of: food, furniture, electronics")]
    UnknownCategory(String),

    /// A discount that is neither an integer nor a `"<digits>%"` string.
    #[error(
        "discount must be a non-negative integer or a percentage such as \"10%\", got {0}"
    )]
    InvalidDiscount(String),

    /// A timestamp that could not be parsed, or is more precise than a microsecond.
    #[error(
        "{field} is not a valid date or date-time with at most microsecond precision: \"{value}\""
    )]
    InvalidTimestamp {
        /// Field holding the timestamp.
        field: &'static str,

        /// Rejected value.
        value: String,
    },

    /// A validity window that ends before it starts.
    #[error("invalid period, start {start} is after end {end}")]
    InvalidPeriod {
        /// Window start.
        start: DateTime,

        /// Window end.
        end: DateTime,
    },

    /// Input carried fields the schema does not know about.
    #[error("unexpected fields: {}", .0.join(", "))]
    UnexpectedFields(Vec<String>),

    /// Input that is not well-formed for the expected shape.
    #[error("malformed input: {0}")]
    Malformed(#[from] serde_json::Error),
}
