//! Point-in-time query parsing helpers.

use coupons::coupons::validity::parse_timestamp;
use jiff::civil::DateTime;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// The requested instant, or the current local time when absent.
    fn into_point_in_time(self) -> Result<DateTime, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<DateTime, StatusError> {
        self.into_inner()
            .map(|value| parse_timestamp("at", &value))
            .transpose()
            .or_400("could not parse \"at\" query parameter")
            .map(|point_in_time| point_in_time.unwrap_or_else(coupons::now))
    }
}
