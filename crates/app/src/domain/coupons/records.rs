//! Coupon Records

use coupons::{
    coupons::{Coupon, CouponCondition, CouponValidity, Discount},
    products::ProductCategory,
};
use jiff::civil::DateTime;

use crate::domain::coupons::errors::CouponsServiceError;

/// Coupon as laid out in the `coupons` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CouponRecord {
    pub(crate) name: String,
    pub(crate) discount: i64,
    pub(crate) is_percent: bool,
    pub(crate) condition_category: Option<String>,
    pub(crate) condition_price_above: Option<i64>,
    pub(crate) validity_start: Option<DateTime>,
    pub(crate) validity_end: Option<DateTime>,
}

impl TryFrom<&Coupon> for CouponRecord {
    type Error = CouponsServiceError;

    fn try_from(coupon: &Coupon) -> Result<Self, Self::Error> {
        let condition = coupon.condition();
        let validity = coupon.validity();

        Ok(Self {
            name: coupon.name().to_string(),
            discount: i64::try_from(coupon.discount().amount())?,
            is_percent: coupon.discount().is_percentage(),
            condition_category: condition
                .and_then(|condition| condition.category)
                .map(|category| category.as_str().to_string()),
            condition_price_above: condition
                .and_then(|condition| condition.price_above)
                .map(i64::try_from)
                .transpose()?,
            validity_start: validity.map(CouponValidity::start),
            validity_end: validity.map(CouponValidity::end),
        })
    }
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = CouponsServiceError;

    fn try_from(record: CouponRecord) -> Result<Self, Self::Error> {
        let amount = u64::try_from(record.discount)?;

        let discount = if record.is_percent {
            Discount::Percentage(amount)
        } else {
            Discount::Fixed(amount)
        };

        let category = record
            .condition_category
            .as_deref()
            .map(str::parse::<ProductCategory>)
            .transpose()?;

        let price_above = record
            .condition_price_above
            .map(u64::try_from)
            .transpose()?;

        let condition = (category.is_some() || price_above.is_some()).then_some(CouponCondition {
            category,
            price_above,
        });

        let validity = match (record.validity_start, record.validity_end) {
            (Some(start), Some(end)) => Some(CouponValidity::new(start, end)?),
            (None, None) => None,
            _ => return Err(CouponsServiceError::InvalidData),
        };

        Ok(Coupon::new(record.name, discount, condition, validity)?)
    }
}
