//! Coupon Errors

use coupons::errors::ValidationError;
use coupons_app::domain::coupons::CouponsServiceError;
use salvo::http::StatusError;
use tracing::error;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon already exists")
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::NotApplicable => StatusError::unprocessable_entity()
            .brief("Coupon is not applicable for this product"),
        CouponsServiceError::Validation(source) => validation_error(&source),
        CouponsServiceError::MissingRequiredData | CouponsServiceError::InvalidData => {
            StatusError::unprocessable_entity().brief("Invalid coupon payload")
        }
        CouponsServiceError::InvalidAmount(source) => {
            error!("stored coupon amount out of range: {source}");

            StatusError::internal_server_error()
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn validation_error(error: &ValidationError) -> StatusError {
    StatusError::unprocessable_entity()
        .brief("Invalid input")
        .detail(error.to_string())
}
