//! Coupon Responses

use coupons::{
    coupons::{Coupon, CouponCondition, CouponValidity, Discount},
    products::Product,
};
use coupons_app::domain::coupons::CouponApplication;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Discount in its client-facing form: `10` or `"10%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum DiscountResponse {
    Fixed(u64),
    Percentage(String),
}

impl From<Discount> for DiscountResponse {
    fn from(discount: Discount) -> Self {
        match discount {
            Discount::Fixed(amount) => DiscountResponse::Fixed(amount),
            Discount::Percentage(_) => DiscountResponse::Percentage(discount.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ConditionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_above: Option<u64>,
}

impl From<&CouponCondition> for ConditionResponse {
    fn from(condition: &CouponCondition) -> Self {
        ConditionResponse {
            category: condition.category.map(|category| category.to_string()),
            price_above: condition.price_above,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidityResponse {
    pub start: String,
    pub end: String,
}

impl From<&CouponValidity> for ValidityResponse {
    fn from(validity: &CouponValidity) -> Self {
        ValidityResponse {
            start: validity.start().to_string(),
            end: validity.end().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// Unique coupon name
    pub name: String,

    pub discount: DiscountResponse,

    /// Omitted when the coupon applies to every product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionResponse>,

    /// Omitted when the coupon never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<ValidityResponse>,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        CouponResponse {
            name: coupon.name().to_string(),
            discount: coupon.discount().into(),
            condition: coupon.condition().map(Into::into),
            validity: coupon.validity().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsResponse {
    pub coupons: Vec<CouponResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub name: String,
    pub price: u64,
    pub category: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            name: product.name().to_string(),
            price: product.price(),
            category: product.category().to_string(),
        }
    }
}

/// Coupon Application Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicationResponse {
    pub coupon: CouponResponse,
    pub product: ProductResponse,

    /// Price after discount; negative for percentages above 100
    pub discounted_price: i64,
}

impl From<CouponApplication> for ApplicationResponse {
    fn from(application: CouponApplication) -> Self {
        ApplicationResponse {
            coupon: application.coupon.into(),
            product: application.product.into(),
            discounted_price: application.discounted_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{make_coupon, make_seasonal_coupon};

    use super::*;

    #[test]
    fn plain_coupon_omits_condition_and_validity() -> TestResult {
        let body = serde_json::to_value(CouponResponse::from(make_coupon("TEN")?))?;

        assert_eq!(body, json!({ "name": "TEN", "discount": 10 }));

        Ok(())
    }

    #[test]
    fn seasonal_coupon_renders_percentage_text() -> TestResult {
        let body = serde_json::to_value(CouponResponse::from(make_seasonal_coupon("SPRING")?))?;

        assert_eq!(
            body,
            json!({
                "name": "SPRING",
                "discount": "15%",
                "condition": { "category": "food", "price_above": 100 },
                "validity": { "start": "2025-03-01T00:00:00", "end": "2025-05-31T23:59:59" },
            })
        );

        Ok(())
    }
}
