//! Coupon Updates

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    coupons::{
        condition::{ConditionInput, CouponCondition},
        discount::{Discount, RawDiscount},
        validity::{CouponValidity, ValidityInput},
    },
    errors::ValidationError,
    input::{UnknownFields, non_empty_name},
};

/// Raw update input. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponUpdateInput {
    /// Name of the coupon to update
    pub name: String,

    /// Replacement discount
    #[serde(default)]
    pub discount: Option<RawDiscount>,

    /// Replacement condition
    #[serde(default)]
    pub condition: Option<ConditionInput>,

    /// Replacement validity window
    #[serde(default)]
    pub validity: Option<ValidityInput>,

    /// Fields outside the update schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Partial coupon update. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponUpdate {
    /// Name of the coupon to update
    pub name: String,

    /// Replacement discount
    pub discount: Option<Discount>,

    /// Replacement condition
    pub condition: Option<CouponCondition>,

    /// Replacement validity window
    pub validity: Option<CouponValidity>,
}

impl CouponUpdate {
    /// Update that changes nothing on the named coupon.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discount: None,
            condition: None,
            validity: None,
        }
    }

    /// Validate raw update input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any present field is invalid, or when `unknown` is
    /// [`UnknownFields::Reject`] and the input carries extra fields.
    pub fn from_input(
        input: CouponUpdateInput,
        unknown: UnknownFields,
    ) -> Result<Self, ValidationError> {
        unknown.check(&input.extra)?;

        Ok(Self {
            name: non_empty_name("name", input.name)?,
            discount: input.discount.map(TryInto::try_into).transpose()?,
            condition: input.condition.map(TryInto::try_into).transpose()?,
            validity: input.validity.map(TryInto::try_into).transpose()?,
        })
    }

    /// Parse an update from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the document is malformed or invalid.
    pub fn parse(json: &str, unknown: UnknownFields) -> Result<Self, ValidationError> {
        Self::from_input(serde_json::from_str(json)?, unknown)
    }

    /// Whether the update leaves every field untouched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.discount.is_none() && self.condition.is_none() && self.validity.is_none()
    }
}
