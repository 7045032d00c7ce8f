//! Coupon Validity

use jiff::civil::{Date, DateTime, Time};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Raw validity window input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidityInput {
    /// Window start, as a date or naive date-time
    pub start: String,

    /// Window end, as a date or naive date-time
    pub end: String,
}

/// Inclusive window of naive timestamps during which a coupon may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ValidityInput")]
pub struct CouponValidity {
    start: DateTime,
    end: DateTime,
}

impl CouponValidity {
    /// Create a validity window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] when a bound is finer than a microsecond,
    /// and [`ValidationError::InvalidPeriod`] when `start` is after `end`.
    pub fn new(start: DateTime, end: DateTime) -> Result<Self, ValidationError> {
        let start = storable("start", start)?;
        let end = storable("end", end)?;

        if start > end {
            return Err(ValidationError::InvalidPeriod { start, end });
        }

        Ok(Self { start, end })
    }

    /// Window start
    #[must_use]
    pub const fn start(&self) -> DateTime {
        self.start
    }

    /// Window end
    #[must_use]
    pub const fn end(&self) -> DateTime {
        self.end
    }

    /// Whether `at` falls within the window, bounds included.
    #[must_use]
    pub fn contains(&self, at: DateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

impl TryFrom<ValidityInput> for CouponValidity {
    type Error = ValidationError;

    fn try_from(input: ValidityInput) -> Result<Self, Self::Error> {
        Self::new(
            parse_timestamp("start", &input.start)?,
            parse_timestamp("end", &input.end)?,
        )
    }
}

/// Bounds are persisted with microsecond precision.
fn storable(field: &'static str, at: DateTime) -> Result<DateTime, ValidationError> {
    if at.subsec_nanosecond() % 1_000 != 0 {
        return Err(ValidationError::InvalidTimestamp {
            field,
            value: at.to_string(),
        });
    }

    Ok(at)
}

/// Parse a naive date-time, or a bare date taken as midnight.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when `value` is neither.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime, ValidationError> {
    value
        .parse::<DateTime>()
        .or_else(|_not_datetime| {
            value
                .parse::<Date>()
                .map(|date| date.to_datetime(Time::midnight()))
        })
        .map_err(|_not_date| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, datetime};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bounds_are_inclusive() -> TestResult {
        let start = datetime(2025, 1, 1, 0, 0, 0, 0);
        let end = datetime(2025, 12, 31, 23, 59, 59, 0);
        let validity = CouponValidity::new(start, end)?;

        assert!(validity.contains(start));
        assert!(validity.contains(end));
        assert!(!validity.contains(datetime(2024, 12, 31, 23, 59, 59, 0)));
        assert!(!validity.contains(datetime(2026, 1, 1, 0, 0, 0, 0)));

        Ok(())
    }

    #[test]
    fn single_instant_window_is_allowed() -> TestResult {
        let at = datetime(2025, 6, 1, 12, 0, 0, 0);
        let validity = CouponValidity::new(at, at)?;

        assert!(validity.contains(at));

        Ok(())
    }

    #[test]
    fn reversed_window_is_rejected() {
        let result = CouponValidity::new(
            datetime(2025, 2, 1, 0, 0, 0, 0),
            datetime(2025, 1, 1, 0, 0, 0, 0),
        );

        assert!(matches!(result, Err(ValidationError::InvalidPeriod { .. })));
    }

    #[test]
    fn sub_microsecond_bounds_are_rejected() -> TestResult {
        let micros = CouponValidity::new(
            datetime(2025, 1, 1, 0, 0, 0, 123_456_000),
            datetime(2025, 1, 2, 0, 0, 0, 0),
        )?;

        assert_eq!(micros.start().subsec_nanosecond(), 123_456_000);

        let result: Result<CouponValidity, _> = ValidityInput {
            start: "2025-01-01".to_string(),
            end: "2025-01-02T00:00:00.123456789".to_string(),
        }
        .try_into();

        assert!(
            matches!(result, Err(ValidationError::InvalidTimestamp { field: "end", .. })),
            "expected InvalidTimestamp, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn bare_dates_parse_as_midnight() -> TestResult {
        assert_eq!(
            parse_timestamp("start", "2025-03-04")?,
            date(2025, 3, 4).to_datetime(Time::midnight())
        );
        assert_eq!(
            parse_timestamp("start", "2025-03-04T10:30:00")?,
            datetime(2025, 3, 4, 10, 30, 0, 0)
        );

        Ok(())
    }

    #[test]
    fn garbage_timestamps_are_rejected() {
        assert!(matches!(
            parse_timestamp("end", "next tuesday"),
            Err(ValidationError::InvalidTimestamp { field: "end", .. })
        ));
    }

    #[test]
    fn deserializes_from_strings() -> TestResult {
        let validity: CouponValidity =
            serde_json::from_value(json!({ "start": "2025-01-01", "end": "2025-01-31T18:00:00" }))?;

        assert_eq!(validity.start(), datetime(2025, 1, 1, 0, 0, 0, 0));
        assert_eq!(validity.end(), datetime(2025, 1, 31, 18, 0, 0, 0));

        Ok(())
    }
}
