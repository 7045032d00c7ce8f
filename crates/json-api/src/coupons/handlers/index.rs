//! List Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    coupons::{errors::into_status_error, responses::CouponsResponse},
    extensions::*,
    state::State,
};

/// List Coupons Handler
///
/// Returns every stored coupon, ordered by name.
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Coupons"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let coupons = state
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsResponse {
        coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}
