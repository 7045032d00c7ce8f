//! Create Coupon Handler

use std::sync::Arc;

use coupons::coupons::Coupon;
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde_json::Value;

use crate::{
    coupons::{
        errors::{into_status_error, validation_error},
        requests::{CreateCouponRequest, decode},
        responses::CouponResponse,
    },
    extensions::*,
    state::State,
};

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    request_body = CreateCouponRequest,
    summary = "Create Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid coupon"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed request body"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.create",
    skip(json, depot, res),
    fields(coupon_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<Value>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupon = decode::<CreateCouponRequest>(json.into_inner())
        .and_then(Coupon::try_from)
        .map_err(|error| validation_error(&error))?;

    tracing::Span::current().record("coupon_name", coupon.name());

    let created = state
        .coupons
        .create_coupon(coupon)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", created.name()), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
