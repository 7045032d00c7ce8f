use clap::Args;
use coupons_app::context::AppContext;

use super::{failure, output};

#[derive(Debug, Args)]
pub(crate) struct GetCouponArgs {
    /// Coupon name
    name: String,
}

pub(crate) async fn run(ctx: &AppContext, args: GetCouponArgs) -> Result<(), String> {
    let coupon = ctx.coupons.get_coupon(&args.name).await.map_err(failure)?;

    println!("{}", output::coupons_table(std::slice::from_ref(&coupon)));

    Ok(())
}
