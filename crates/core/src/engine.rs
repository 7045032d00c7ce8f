//! Applicability Engine

use jiff::{Zoned, civil::DateTime};

use crate::{coupons::Coupon, products::Product};

/// Decides whether coupons apply to products and computes discounted prices.
///
/// The engine holds no state and never touches storage, so a single value can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicabilityEngine;

impl ApplicabilityEngine {
    /// Create an engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether `now` falls inside the coupon's validity window. Coupons without a window
    /// are always valid.
    #[must_use]
    pub fn is_valid(self, coupon: &Coupon, now: DateTime) -> bool {
        coupon
            .validity()
            .is_none_or(|validity| validity.contains(now))
    }

    /// Whether the coupon is valid at `now` and its condition matches `product`.
    #[must_use]
    pub fn is_applicable(self, coupon: &Coupon, product: &Product, now: DateTime) -> bool {
        if !self.is_valid(coupon, now) {
            return false;
        }

        coupon
            .condition()
            .is_none_or(|condition| condition.matches(product))
    }

    /// Discounted price of `product`, without any applicability check.
    #[must_use]
    pub fn apply_discount(self, coupon: &Coupon, product: &Product) -> i64 {
        coupon.discount().apply_to(product.price())
    }
}

/// Current local wall-clock time as a naive timestamp.
#[must_use]
pub fn now() -> DateTime {
    Zoned::now().datetime()
}
