use coupons_app::context::AppContext;

use super::{failure, output};

pub(crate) async fn run(ctx: &AppContext) -> Result<(), String> {
    let coupons = ctx.coupons.list_coupons().await.map_err(failure)?;

    if coupons.is_empty() {
        println!("no coupons found");
        return Ok(());
    }

    println!("{}", output::coupons_table(&coupons));

    Ok(())
}
