//! Coupon Discounts

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize, Serializer};

use crate::{amounts, errors::ValidationError};

/// Raw discount input: a JSON number or a string such as `"10"` or `"10%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDiscount {
    /// Integral number
    Integer(i64),

    /// Number with a fractional part (always rejected)
    Decimal(f64),

    /// Textual form
    Text(String),
}

/// Normalised discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawDiscount")]
pub enum Discount {
    /// Subtract a flat amount, in the same unit as the price.
    Fixed(u64),

    /// Take a percentage off the price.
    Percentage(u64),
}

impl Discount {
    /// Magnitude of the discount, without its unit.
    #[must_use]
    pub const fn amount(self) -> u64 {
        match self {
            Self::Fixed(amount) | Self::Percentage(amount) => amount,
        }
    }

    /// Whether the magnitude is a percentage.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(self, Self::Percentage(_))
    }

    /// Price after applying this discount to `price`.
    ///
    /// Fixed discounts floor at zero. Percentage discounts use integer floor division; a
    /// percentage above 100 yields a negative price and saturates at `i64::MIN`.
    #[must_use]
    pub fn apply_to(self, price: u64) -> i64 {
        match self {
            Self::Fixed(amount) => {
                i64::try_from(price.saturating_sub(amount)).unwrap_or(i64::MAX)
            }
            Self::Percentage(percentage) => percentage_off(percentage, price),
        }
    }

    pub(crate) fn checked(self) -> Result<Self, ValidationError> {
        amounts::bounded("discount", self.amount())?;

        Ok(self)
    }
}

fn percentage_off(percentage: u64, price: u64) -> i64 {
    let Some(scaled) = (100_i128 - i128::from(percentage)).checked_mul(i128::from(price)) else {
        return i64::MIN;
    };

    let floored = scaled.div_euclid(100);

    i64::try_from(floored).unwrap_or(if floored < 0 { i64::MIN } else { i64::MAX })
}

impl Display for Discount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(amount) => write!(f, "{amount}"),
            Self::Percentage(percentage) => write!(f, "{percentage}%"),
        }
    }
}

impl FromStr for Discount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, is_percentage) = match s.strip_suffix('%') {
            Some(digits) => (digits, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::InvalidDiscount(format!("\"{s}\"")));
        }

        let amount = digits
            .parse::<u64>()
            .map_err(|_overflow| ValidationError::AmountOutOfRange {
                field: "discount",
                value: s.to_string(),
            })?;

        let discount = if is_percentage {
            Self::Percentage(amount)
        } else {
            Self::Fixed(amount)
        };

        discount.checked()
    }
}

impl TryFrom<RawDiscount> for Discount {
    type Error = ValidationError;

    fn try_from(raw: RawDiscount) -> Result<Self, Self::Error> {
        match raw {
            RawDiscount::Integer(amount) => {
                Ok(Self::Fixed(amounts::from_signed("discount", amount)?))
            }
            RawDiscount::Decimal(amount) => Err(ValidationError::InvalidDiscount(amount.to_string())),
            RawDiscount::Text(text) => text.parse(),
        }
    }
}

impl From<Discount> for RawDiscount {
    fn from(discount: Discount) -> Self {
        match discount {
            Discount::Fixed(amount) => i64::try_from(amount)
                .map_or_else(|_too_large| Self::Text(amount.to_string()), Self::Integer),
            Discount::Percentage(_) => Self::Text(discount.to_string()),
        }
    }
}

impl Serialize for Discount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fixed(amount) => serializer.serialize_u64(*amount),
            Self::Percentage(_) => serializer.collect_str(self),
        }
    }
}
