//! Coupon Requests

use coupons::{
    coupons::{
        ConditionInput, Coupon, CouponInput, CouponUpdate, CouponUpdateInput, RawDiscount,
        ValidityInput,
    },
    errors::ValidationError,
    input::UnknownFields,
    products::{Product, ProductInput},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// Decode an already parsed JSON body.
///
/// Missing fields, unknown fields and mistyped values are reported as
/// [`ValidationError::Malformed`], so clients see them alongside the other validation failures.
pub(crate) fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ValidationError> {
    Ok(serde_json::from_value(body)?)
}

/// Discount as given by the client: an integer amount or a `"<n>%"` percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum DiscountRequest {
    Amount(i64),
    Decimal(f64),
    Text(String),
}

impl From<DiscountRequest> for RawDiscount {
    fn from(request: DiscountRequest) -> Self {
        match request {
            DiscountRequest::Amount(amount) => RawDiscount::Integer(amount),
            DiscountRequest::Decimal(amount) => RawDiscount::Decimal(amount),
            DiscountRequest::Text(text) => RawDiscount::Text(text),
        }
    }
}

/// Coupon Condition Request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConditionRequest {
    /// Required product category (food, furniture, electronics)
    #[serde(default)]
    pub category: Option<String>,

    /// Product price must be strictly greater than this
    #[serde(default)]
    pub price_above: Option<i64>,
}

impl From<ConditionRequest> for ConditionInput {
    fn from(request: ConditionRequest) -> Self {
        ConditionInput {
            category: request.category,
            price_above: request.price_above,
        }
    }
}

/// Coupon Validity Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ValidityRequest {
    /// First valid instant, `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
    pub start: String,

    /// Last valid instant, inclusive
    pub end: String,
}

impl From<ValidityRequest> for ValidityInput {
    fn from(request: ValidityRequest) -> Self {
        ValidityInput {
            start: request.start,
            end: request.end,
        }
    }
}

/// Create Coupon Request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CreateCouponRequest {
    pub name: String,
    pub discount: DiscountRequest,
    #[serde(default)]
    pub condition: Option<ConditionRequest>,
    #[serde(default)]
    pub validity: Option<ValidityRequest>,
}

impl TryFrom<CreateCouponRequest> for Coupon {
    type Error = ValidationError;

    fn try_from(request: CreateCouponRequest) -> Result<Self, Self::Error> {
        Coupon::from_input(
            CouponInput {
                name: request.name,
                discount: request.discount.into(),
                condition: request.condition.map(Into::into),
                validity: request.validity.map(Into::into),
                extra: Map::new(),
            },
            UnknownFields::Reject,
        )
    }
}

/// Update Coupon Request
///
/// Fields left out keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateCouponRequest {
    /// Must match the name in the path when given
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discount: Option<DiscountRequest>,
    #[serde(default)]
    pub condition: Option<ConditionRequest>,
    #[serde(default)]
    pub validity: Option<ValidityRequest>,
}

impl UpdateCouponRequest {
    pub(crate) fn into_update(self, name: String) -> Result<CouponUpdate, ValidationError> {
        CouponUpdate::from_input(
            CouponUpdateInput {
                name,
                discount: self.discount.map(Into::into),
                condition: self.condition.map(Into::into),
                validity: self.validity.map(Into::into),
                extra: Map::new(),
            },
            UnknownFields::Reject,
        )
    }
}

/// Product Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProductRequest {
    pub name: String,

    /// Price in the smallest currency unit
    pub price: i64,

    /// One of food, furniture, electronics
    pub category: String,
}

impl TryFrom<ProductRequest> for Product {
    type Error = ValidationError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        Product::from_input(
            ProductInput {
                name: request.name,
                price: request.price,
                category: request.category,
                extra: Map::new(),
            },
            UnknownFields::Reject,
        )
    }
}

#[cfg(test)]
mod tests {
    use coupons::{coupons::Discount, products::ProductCategory};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn create_request_accepts_percentage_text() -> TestResult {
        let request: CreateCouponRequest =
            serde_json::from_str(r#"{"name": "TEN", "discount": "10%"}"#)?;

        let coupon = Coupon::try_from(request)?;

        assert_eq!(coupon.discount(), Discount::Percentage(10));
        assert_eq!(coupon.condition(), None);

        Ok(())
    }

    #[test]
    fn create_request_rejects_decimal_discount() -> TestResult {
        let request: CreateCouponRequest =
            serde_json::from_str(r#"{"name": "TENTH", "discount": 0.1}"#)?;

        let result = Coupon::try_from(request);

        assert!(
            matches!(result, Err(ValidationError::InvalidDiscount(_))),
            "expected InvalidDiscount, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn decode_reports_shape_errors_as_malformed() {
        let bodies = [
            json!({ "discount": 1 }),
            json!({ "name": "c" }),
            json!({ "name": "c", "discount": 1, "vip": true }),
            json!({ "name": "c", "discount": true }),
            json!({ "name": "c", "discount": 1, "condition": { "vip": true } }),
        ];

        for body in bodies {
            let result = decode::<CreateCouponRequest>(body.clone());

            assert!(
                matches!(result, Err(ValidationError::Malformed(_))),
                "expected Malformed for {body}, got {result:?}"
            );
        }
    }

    #[test]
    fn update_request_keeps_missing_fields_unset() -> TestResult {
        let request: UpdateCouponRequest =
            serde_json::from_str(r#"{"condition": {"price_above": 50}}"#)?;

        let update = request.into_update("TEN".to_string())?;

        assert_eq!(update.name, "TEN");
        assert_eq!(update.discount, None);
        assert_eq!(update.validity, None);
        assert_eq!(
            update.condition.and_then(|condition| condition.price_above),
            Some(50)
        );

        Ok(())
    }

    #[test]
    fn product_request_validates_category() -> TestResult {
        let product = Product::try_from(ProductRequest {
            name: "Sofa".to_string(),
            price: 500,
            category: "furniture".to_string(),
        })?;

        assert_eq!(product.category(), ProductCategory::Furniture);

        let result = Product::try_from(ProductRequest {
            name: "Shirt".to_string(),
            price: 20,
            category: "cloth".to_string(),
        });

        assert!(
            matches!(result, Err(ValidationError::UnknownCategory(_))),
            "expected UnknownCategory, got {result:?}"
        );

        Ok(())
    }
}
