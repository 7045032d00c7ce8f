//! Coupons

pub mod applications;
pub mod errors;
pub(crate) mod records;
mod repositories;
pub mod service;

pub use applications::{CouponApplication, apply_coupon};
pub use errors::CouponsServiceError;
pub use service::*;
