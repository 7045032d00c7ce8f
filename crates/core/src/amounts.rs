//! Monetary amounts

use crate::errors::ValidationError;

/// Largest accepted price or discount magnitude.
///
/// Amounts are stored in signed 64-bit columns, so anything above `i64::MAX` is rejected at
/// construction.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Accept a signed input amount, rejecting negatives.
pub(crate) fn from_signed(field: &'static str, value: i64) -> Result<u64, ValidationError> {
    u64::try_from(value).map_err(|_negative| ValidationError::AmountOutOfRange {
        field,
        value: value.to_string(),
    })
}

/// Accept an unsigned amount, rejecting anything above [`MAX_AMOUNT`].
pub(crate) fn bounded(field: &'static str, value: u64) -> Result<u64, ValidationError> {
    if value > MAX_AMOUNT {
        return Err(ValidationError::AmountOutOfRange {
            field,
            value: value.to_string(),
        });
    }

    Ok(value)
}
