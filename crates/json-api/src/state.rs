//! State

use std::sync::Arc;

use coupons_app::{context::AppContext, domain::coupons::CouponsService};
use jiff::{SignedDuration, Timestamp};

/// Shared by every request through the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) coupons: Arc<dyn CouponsService>,
    started_at: Timestamp,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            coupons: app.coupons,
            started_at: Timestamp::now(),
        })
    }

    /// Time since the server state was built.
    pub(crate) fn uptime(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use coupons_app::domain::coupons::MockCouponsService;

    use super::*;

    #[test]
    fn uptime_starts_near_zero() {
        let state = State::from_app_context(AppContext {
            coupons: Arc::new(MockCouponsService::new()),
        });

        let uptime = state.uptime();

        assert!(!uptime.is_negative(), "uptime went backwards: {uptime}");
        assert!(uptime < SignedDuration::from_secs(60), "uptime too large: {uptime}");
    }
}
