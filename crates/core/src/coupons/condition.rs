//! Coupon Conditions

use serde::{Deserialize, Serialize};

use crate::{
    amounts,
    errors::ValidationError,
    products::{Product, ProductCategory},
};

/// Raw condition input. Unknown keys are always rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionInput {
    /// Required product category name
    #[serde(default)]
    pub category: Option<String>,

    /// Exclusive price threshold
    #[serde(default)]
    pub price_above: Option<i64>,
}

/// Restriction on which products a coupon applies to.
///
/// Absent fields impose no restriction, so an empty condition matches every product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConditionInput")]
pub struct CouponCondition {
    /// Product must belong to this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,

    /// Product price must be strictly greater than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_above: Option<u64>,
}

impl CouponCondition {
    /// Condition restricted to a single category.
    #[must_use]
    pub const fn for_category(category: ProductCategory) -> Self {
        Self {
            category: Some(category),
            price_above: None,
        }
    }

    /// Condition restricted to prices strictly above `threshold`.
    #[must_use]
    pub const fn for_price_above(threshold: u64) -> Self {
        Self {
            category: None,
            price_above: Some(threshold),
        }
    }

    /// Whether neither restriction is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.price_above.is_none()
    }

    /// Whether `product` satisfies every restriction that is set.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .is_none_or(|category| category == product.category())
            && self
                .price_above
                .is_none_or(|threshold| product.price() > threshold)
    }

    pub(crate) fn checked(self) -> Result<Self, ValidationError> {
        if let Some(threshold) = self.price_above {
            amounts::bounded("price_above", threshold)?;
        }

        Ok(self)
    }
}

impl TryFrom<ConditionInput> for CouponCondition {
    type Error = ValidationError;

    fn try_from(input: ConditionInput) -> Result<Self, Self::Error> {
        Ok(Self {
            category: input.category.as_deref().map(str::parse).transpose()?,
            price_above: input
                .price_above
                .map(|threshold| amounts::from_signed("price_above", threshold))
                .transpose()?,
        })
    }
}
