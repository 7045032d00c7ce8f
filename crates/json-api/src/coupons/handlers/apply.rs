//! Apply Coupon Handler

use std::sync::Arc;

use coupons::products::Product;
use coupons_app::domain::coupons::apply_coupon;
use salvo::{
    oapi::extract::{JsonBody, PathParam, QueryParam},
    prelude::*,
};
use serde_json::Value;

use crate::{
    coupons::{
        errors::{into_status_error, validation_error},
        requests::{ProductRequest, decode},
        responses::ApplicationResponse,
    },
    extensions::*,
    state::State,
};

/// Apply Coupon Handler
///
/// Checks the coupon against the product at `at` (default: now) and returns the discounted
/// price.
#[endpoint(
    tags("coupons"),
    request_body = ProductRequest,
    summary = "Apply Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Discount applied"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid product or coupon not applicable"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    at: QueryParam<String, false>,
    json: JsonBody<Value>,
    depot: &mut Depot,
) -> Result<Json<ApplicationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let product = decode::<ProductRequest>(json.into_inner())
        .and_then(Product::try_from)
        .map_err(|error| validation_error(&error))?;

    let application = apply_coupon(
        state.coupons.as_ref(),
        &name.into_inner(),
        product,
        point_in_time,
    )
    .await
    .map_err(into_status_error)?;

    Ok(Json(application.into()))
}
