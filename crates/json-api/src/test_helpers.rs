//! Test helpers.

use std::sync::Arc;

use coupons::{
    coupons::{Coupon, CouponCondition, CouponValidity, Discount},
    errors::ValidationError,
    products::ProductCategory,
};
use coupons_app::{context::AppContext, domain::coupons::MockCouponsService};
use jiff::civil::datetime;
use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

/// Mock for requests that must be rejected before reaching the service.
pub(crate) fn strict_mock() -> MockCouponsService {
    let mut coupons = MockCouponsService::new();

    coupons.expect_list_coupons().never();
    coupons.expect_get_coupon().never();
    coupons.expect_create_coupon().never();
    coupons.expect_update_coupon().never();
    coupons.expect_delete_coupon().never();
    coupons.expect_ping().never();
    coupons.expect_close().never();

    coupons
}

pub(crate) fn state_with_coupons(coupons: MockCouponsService) -> Arc<State> {
    State::from_app_context(AppContext {
        coupons: Arc::new(coupons),
    })
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_coupons(coupons)))
            .push(route),
    )
}

pub(crate) fn make_coupon(name: &str) -> Result<Coupon, ValidationError> {
    Coupon::new(name, Discount::Fixed(10), None, None)
}

pub(crate) fn make_seasonal_coupon(name: &str) -> Result<Coupon, ValidationError> {
    Coupon::new(
        name,
        Discount::Percentage(15),
        Some(CouponCondition {
            category: Some(ProductCategory::Food),
            price_above: Some(100),
        }),
        Some(CouponValidity::new(
            datetime(2025, 3, 1, 0, 0, 0, 0),
            datetime(2025, 5, 31, 23, 59, 59, 0),
        )?),
    )
}
