//! Coupon storage and application services.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
