//! Coupons Repositories

pub(crate) mod postgres;
pub(crate) mod sqlite;
