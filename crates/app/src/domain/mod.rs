//! Application domains

pub mod coupons;
