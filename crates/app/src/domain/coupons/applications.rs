//! Coupon Applications

use coupons::{ApplicabilityEngine, coupons::Coupon, products::Product};
use jiff::civil::DateTime;
use serde::Serialize;
use tracing::debug;

use crate::domain::coupons::{errors::CouponsServiceError, service::CouponsService};

/// Outcome of applying a coupon to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponApplication {
    pub coupon: Coupon,
    pub product: Product,
    pub discounted_price: i64,
}

/// Look up a coupon and apply it to `product` as of `at`.
///
/// # Errors
///
/// Returns [`CouponsServiceError::NotFound`] when no coupon has that name,
/// [`CouponsServiceError::NotApplicable`] when the coupon is expired or its condition does not
/// match, and any storage error from the lookup.
pub async fn apply_coupon(
    coupons: &dyn CouponsService,
    name: &str,
    product: Product,
    at: DateTime,
) -> Result<CouponApplication, CouponsServiceError> {
    let coupon = coupons.get_coupon(name).await?;
    let engine = ApplicabilityEngine::new();

    if !engine.is_applicable(&coupon, &product, at) {
        debug!(coupon_name = name, product_name = product.name(), "coupon not applicable");

        return Err(CouponsServiceError::NotApplicable);
    }

    let discounted_price = engine.apply_discount(&coupon, &product);

    Ok(CouponApplication {
        coupon,
        product,
        discounted_price,
    })
}
