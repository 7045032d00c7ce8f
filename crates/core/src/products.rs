//! Products

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    amounts,
    errors::ValidationError,
    input::{UnknownFields, non_empty_name},
};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    /// Food
    Food,

    /// Furniture
    Furniture,

    /// Electronics
    Electronics,
}

impl ProductCategory {
    /// Every known category.
    pub const ALL: [Self; 3] = [Self::Food, Self::Furniture, Self::Electronics];

    /// Lowercase name used in input and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Furniture => "furniture",
            Self::Electronics => "electronics",
        }
    }
}

impl Display for ProductCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Raw product input, as parsed from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    /// Product name
    pub name: String,

    /// Price in the smallest currency unit
    pub price: i64,

    /// Category name
    pub category: String,

    /// Fields outside the product schema
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Product a coupon may apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductInput")]
pub struct Product {
    name: String,
    price: u64,
    category: ProductCategory,
}

impl Product {
    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is empty or the price exceeds
    /// [`MAX_AMOUNT`](crate::amounts::MAX_AMOUNT).
    pub fn new(
        name: impl Into<String>,
        price: u64,
        category: ProductCategory,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_empty_name("name", name.into())?,
            price: amounts::bounded("price", price)?,
            category,
        })
    }

    /// Validate raw product input.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any field is invalid, or when `unknown` is
    /// [`UnknownFields::Reject`] and the input carries extra fields.
    pub fn from_input(input: ProductInput, unknown: UnknownFields) -> Result<Self, ValidationError> {
        unknown.check(&input.extra)?;

        Ok(Self {
            name: non_empty_name("name", input.name)?,
            price: amounts::from_signed("price", input.price)?,
            category: input.category.parse()?,
        })
    }

    /// Parse a product from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the document is malformed or invalid.
    pub fn parse(json: &str, unknown: UnknownFields) -> Result<Self, ValidationError> {
        Self::from_input(serde_json::from_str(json)?, unknown)
    }

    /// Product name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product price
    #[must_use]
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Product category
    #[must_use]
    pub fn category(&self) -> ProductCategory {
        self.category
    }
}

impl TryFrom<ProductInput> for Product {
    type Error = ValidationError;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        Self::from_input(input, UnknownFields::Reject)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_valid_product() -> TestResult {
        let product = Product::parse(
            r#"{"name": "chair", "price": 120, "category": "furniture"}"#,
            UnknownFields::Reject,
        )?;

        assert_eq!(product.name(), "chair");
        assert_eq!(product.price(), 120);
        assert_eq!(product.category(), ProductCategory::Furniture);

        Ok(())
    }

    #[test]
    fn missing_name_is_rejected() {
        let result = Product::parse(r#"{"price": 1, "category": "food"}"#, UnknownFields::Reject);

        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = Product::new("  ", 1, ProductCategory::Food);

        assert!(matches!(
            result,
            Err(ValidationError::EmptyName { field: "name" })
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = Product::parse(
            r#"{"name": "apple", "price": -1, "category": "food"}"#,
            UnknownFields::Reject,
        );

        assert!(matches!(
            result,
            Err(ValidationError::AmountOutOfRange { field: "price", .. })
        ));
    }

    #[test]
    fn fractional_price_is_rejected() {
        let result = Product::parse(
            r#"{"name": "apple", "price": 1.5, "category": "food"}"#,
            UnknownFields::Reject,
        );

        assert!(matches!(result, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let result = Product::parse(
            r#"{"name": "shirt", "price": 10, "category": "cloth"}"#,
            UnknownFields::Reject,
        );

        assert!(matches!(result, Err(ValidationError::UnknownCategory(c)) if c == "cloth"));
    }

    #[test]
    fn strict_parsing_rejects_extra_fields() {
        let result = Product::parse(
            r#"{"name": "apple", "price": 1, "category": "food", "colour": "red"}"#,
            UnknownFields::Reject,
        );

        assert!(
            matches!(&result, Err(ValidationError::UnexpectedFields(fields)) if fields == &["colour"]),
            "expected UnexpectedFields, got {result:?}"
        );
    }

    #[test]
    fn permissive_parsing_ignores_extra_fields() -> TestResult {
        let product = Product::parse(
            r#"{"name": "apple", "price": 1, "category": "food", "colour": "red"}"#,
            UnknownFields::Ignore,
        )?;

        assert_eq!(product.name(), "apple");

        Ok(())
    }

    #[test]
    fn deserialize_is_strict() {
        let result: Result<Product, _> = serde_json::from_str(
            r#"{"name": "apple", "price": 1, "category": "food", "colour": "red"}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn serializes_category_in_lowercase() -> TestResult {
        let product = Product::new("tv", 500, ProductCategory::Electronics)?;

        assert_eq!(
            serde_json::to_value(&product)?,
            serde_json::json!({ "name": "tv", "price": 500, "category": "electronics" })
        );

        Ok(())
    }

    #[test]
    fn category_round_trips_through_text() -> TestResult {
        for category in ProductCategory::ALL {
            assert_eq!(category.to_string().parse::<ProductCategory>()?, category);
        }

        Ok(())
    }
}
