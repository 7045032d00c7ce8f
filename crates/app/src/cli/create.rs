use clap::Args;
use coupons::{
    coupons::{Coupon, CouponInput, RawDiscount},
    input::UnknownFields,
};
use coupons_app::context::AppContext;
use serde_json::Map;

use super::{condition_input, failure, invalid, output, validity_input};

#[derive(Debug, Args)]
pub(crate) struct CreateCouponArgs {
    /// Whole coupon as a JSON document
    #[arg(
        long,
        conflicts_with_all = ["name", "discount", "category", "price_above", "start", "end"]
    )]
    json: Option<String>,

    /// Unique coupon name
    #[arg(long, required_unless_present = "json")]
    name: Option<String>,

    /// Fixed amount such as `10`, or a percentage such as `10%`
    #[arg(long, required_unless_present = "json")]
    discount: Option<String>,

    /// Only apply to products in this category
    #[arg(long)]
    category: Option<String>,

    /// Only apply to products priced strictly above this amount
    #[arg(long)]
    price_above: Option<i64>,

    /// Start of the validity window, as a date or date-time
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// End of the validity window, as a date or date-time
    #[arg(long, requires = "start")]
    end: Option<String>,
}

impl CreateCouponArgs {
    fn into_coupon(self) -> Result<Coupon, String> {
        if let Some(json) = self.json {
            return Coupon::parse(&json, UnknownFields::Reject).map_err(invalid);
        }

        let input = CouponInput {
            name: self.name.unwrap_or_default(),
            discount: RawDiscount::Text(self.discount.unwrap_or_default()),
            condition: condition_input(self.category, self.price_above),
            validity: validity_input(self.start, self.end),
            extra: Map::new(),
        };

        Coupon::from_input(input, UnknownFields::Reject).map_err(invalid)
    }
}

pub(crate) async fn run(ctx: &AppContext, args: CreateCouponArgs) -> Result<(), String> {
    let coupon = args.into_coupon()?;

    let created = ctx.coupons.create_coupon(coupon).await.map_err(failure)?;

    println!("{}", output::coupons_table(std::slice::from_ref(&created)));

    Ok(())
}
