//! Update Coupon Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde_json::Value;

use crate::{
    coupons::{
        errors::{into_status_error, validation_error},
        requests::{UpdateCouponRequest, decode},
        responses::CouponResponse,
    },
    extensions::*,
    state::State,
};

/// Update Coupon Handler
///
/// Replaces the fields present in the body and keeps the rest.
#[endpoint(
    tags("coupons"),
    request_body = UpdateCouponRequest,
    summary = "Update Coupon",
    responses(
        (status_code = StatusCode::ACCEPTED, description = "Coupon updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid coupon"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed request body"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "coupons.update",
    skip(name, json, depot, res),
    fields(coupon_name = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    json: JsonBody<Value>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let name = name.into_inner();
    let request =
        decode::<UpdateCouponRequest>(json.into_inner()).map_err(|error| validation_error(&error))?;

    tracing::Span::current().record("coupon_name", name.as_str());

    if request.name.as_ref().is_some_and(|renamed| *renamed != name) {
        return Err(StatusError::unprocessable_entity().brief("Coupon name cannot be changed"));
    }

    let update = request
        .into_update(name)
        .map_err(|error| validation_error(&error))?;

    let updated = state
        .coupons
        .update_coupon(update)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/coupons/{}", updated.name()), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::ACCEPTED);

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use coupons::coupons::{CouponUpdate, Discount};
    use coupons_app::domain::coupons::{CouponsServiceError, MockCouponsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        coupons::responses::DiscountResponse,
        test_helpers::{coupons_service, make_seasonal_coupon, strict_mock},
    };

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("coupons/{name}").put(handler))
    }

    #[tokio::test]
    async fn test_update_coupon_success() -> TestResult {
        let updated = make_seasonal_coupon("SPRING")?.merge(&CouponUpdate {
            discount: Some(Discount::Fixed(5)),
            ..CouponUpdate::named("SPRING")
        })?;

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_update_coupon()
            .once()
            .withf(|update| {
                *update
                    == CouponUpdate {
                        discount: Some(Discount::Fixed(5)),
                        ..CouponUpdate::named("SPRING")
                    }
            })
            .return_once(move |_| Ok(updated));

        coupons.expect_list_coupons().never();
        coupons.expect_get_coupon().never();
        coupons.expect_create_coupon().never();
        coupons.expect_delete_coupon().never();

        let mut res = TestClient::put("http://example.com/coupons/SPRING")
            .json(&json!({ "discount": 5 }))
            .send(&make_service(coupons))
            .await;

        let body: CouponResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::ACCEPTED));
        assert_eq!(location, Some("/coupons/SPRING"));
        assert_eq!(body.discount, DiscountResponse::Fixed(5));
        assert!(body.validity.is_some(), "validity should be kept");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_coupon_returns_404() {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_update_coupon()
            .once()
            .withf(|update| update.name == "GONE")
            .return_once(|_| Err(CouponsServiceError::NotFound));

        let res = TestClient::put("http://example.com/coupons/GONE")
            .json(&json!({ "discount": "10%" }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_with_invalid_period_returns_422() {
        let res = TestClient::put("http://example.com/coupons/SPRING")
            .json(&json!({ "validity": { "start": "2025-06-01", "end": "2025-05-01" } }))
            .send(&make_service(strict_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_update_renaming_returns_422() {
        let res = TestClient::put("http://example.com/coupons/SPRING")
            .json(&json!({ "name": "SUMMER", "discount": 5 }))
            .send(&make_service(strict_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_update_unknown_field_returns_422() {
        let res = TestClient::put("http://example.com/coupons/SPRING")
            .json(&json!({ "discount": 5, "stackable": true }))
            .send(&make_service(strict_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_update_mistyped_discount_returns_422() {
        let res = TestClient::put("http://example.com/coupons/SPRING")
            .json(&json!({ "discount": true }))
            .send(&make_service(strict_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn test_update_truncated_body_returns_400() {
        let res = TestClient::put("http://example.com/coupons/SPRING")
            .add_header("content-type", "application/json", true)
            .body("{\"discount\": ")
            .send(&make_service(strict_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
