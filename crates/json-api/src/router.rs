//! App Router

use salvo::Router;

use crate::coupons;

pub(crate) fn app_router() -> Router {
    Router::with_path("coupons")
        .get(coupons::index::handler)
        .post(coupons::create::handler)
        .push(
            Router::with_path("{name}")
                .get(coupons::get::handler)
                .put(coupons::update::handler)
                .delete(coupons::delete::handler)
                .push(Router::with_path("apply").post(coupons::apply::handler)),
        )
}
