//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Whether the coupon storage accepted a connection
    pub storage: String,

    /// Whole seconds since the server started
    pub uptime_secs: i64,
}

/// Healthcheck handler
///
/// Answers 503 when the coupon storage cannot be reached.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service and storage are up"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Storage unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(source) = state.coupons.ping().await {
        error!("coupon storage unreachable: {source}");

        return Err(StatusError::service_unavailable().brief("Coupon storage unreachable"));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        storage: "ok".to_string(),
        uptime_secs: state.uptime().as_secs(),
    }))
}

#[cfg(test)]
mod tests {
    use coupons_app::domain::coupons::{CouponsServiceError, MockCouponsService};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::coupons_service;

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("healthcheck").get(handler))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_ping().once().returning(|| Ok(()));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(coupons))
            .await;

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "ok");
        assert_eq!(body.storage, "ok");
        assert!(body.uptime_secs >= 0);

        Ok(())
    }

    #[tokio::test]
    async fn healthcheck_unreachable_storage_returns_503() {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_ping()
            .once()
            .returning(|| Err(CouponsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
