use clap::Args;
use coupons_app::context::AppContext;

use super::failure;

#[derive(Debug, Args)]
pub(crate) struct DeleteCouponArgs {
    /// Coupon name
    name: String,
}

pub(crate) async fn run(ctx: &AppContext, args: DeleteCouponArgs) -> Result<(), String> {
    ctx.coupons
        .delete_coupon(&args.name)
        .await
        .map_err(failure)?;

    println!("deleted coupon {}", args.name);

    Ok(())
}
