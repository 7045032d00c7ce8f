//! Coupons

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    errors::ValidationError,
    input::{UnknownFields, non_empty_name},
};

pub mod condition;
pub mod discount;
pub mod update;
pub mod validity;

pub use condition::{ConditionInput, CouponCondition};
pub use discount::{Discount, RawDiscount};
pub use update::{CouponUpdate, CouponUpdateInput};
pub use validity::{CouponValidity, ValidityInput};

/// Raw coupon input, as parsed from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponInput {
    /// Coupon name
    pub name: String,

    /// Integer, digit string, or `"<digits>%"` string
    pub discount: RawDiscount,

    /// Optional applicability condition
    #[serde(default)]
    pub condition: Option<ConditionInput>,

    /// Optional validity window
    #[serde(default)]
    pub validity: Option<ValidityInput>,

    /// Fields outside the coupon schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named discount rule.
///
/// Deserializing a coupon ignores unknown top-level fields; use [`Coupon::parse`] with
/// [`UnknownFields::Reject`] for strict input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CouponInput")]
pub struct Coupon {
    name: String,
    discount: Discount,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<CouponCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validity: Option<CouponValidity>,
}

impl Coupon {
    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is empty or an amount exceeds
    /// [`MAX_AMOUNT`](crate::amounts::MAX_AMOUNT).
    pub fn new(
        name: impl Into<String>,
        discount: Discount,
        condition: Option<CouponCondition>,
        validity: Option<CouponValidity>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_empty_name("name", name.into())?,
            discount: discount.checked()?,
            condition: condition.map(CouponCondition::checked).transpose()?,
            validity,
        })
    }

    /// Validate raw coupon input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any field is invalid, or when `unknown` is
    /// [`UnknownFields::Reject`] and the input carries extra top-level fields.
    pub fn from_input(input: CouponInput, unknown: UnknownFields) -> Result<Self, ValidationError> {
        unknown.check(&input.extra)?;

        Self::new(
            input.name,
            input.discount.try_into()?,
            input.condition.map(TryInto::try_into).transpose()?,
            input.validity.map(TryInto::try_into).transpose()?,
        )
    }

    /// Parse a coupon from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the document is malformed or invalid.
    pub fn parse(json: &str, unknown: UnknownFields) -> Result<Self, ValidationError> {
        Self::from_input(serde_json::from_str(json)?, unknown)
    }

    /// Apply a partial update, keeping current values for fields it leaves unset.
    ///
    /// The coupon name never changes.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the merged coupon is invalid.
    pub fn merge(&self, update: &CouponUpdate) -> Result<Self, ValidationError> {
        Self::new(
            self.name.clone(),
            update.discount.unwrap_or(self.discount),
            update.condition.or(self.condition),
            update.validity.or(self.validity),
        )
    }

    /// Unique coupon name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Discount rule
    #[must_use]
    pub const fn discount(&self) -> Discount {
        self.discount
    }

    /// Applicability condition, if any
    #[must_use]
    pub const fn condition(&self) -> Option<&CouponCondition> {
        self.condition.as_ref()
    }

    /// Validity window, if any
    #[must_use]
    pub const fn validity(&self) -> Option<&CouponValidity> {
        self.validity.as_ref()
    }
}

impl TryFrom<CouponInput> for Coupon {
    type Error = ValidationError;

    fn try_from(input: CouponInput) -> Result<Self, Self::Error> {
        Self::from_input(input, UnknownFields::Ignore)
    }
}
