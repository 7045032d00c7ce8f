//! Common imports for working with coupons.

pub use crate::{
    coupons::{Coupon, CouponCondition, CouponInput, CouponUpdate, CouponValidity, Discount},
    engine::{ApplicabilityEngine, now},
    errors::ValidationError,
    input::UnknownFields,
    products::{Product, ProductCategory, ProductInput},
};
