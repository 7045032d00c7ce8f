//! Coupons
//!
//! Named discount rules, the products they apply to, and the engine that decides whether a
//! coupon applies and what the discounted price is.

pub mod amounts;
pub mod coupons;
pub mod engine;
pub mod errors;
pub mod input;
pub mod prelude;
pub mod products;

pub use engine::{ApplicabilityEngine, now};
