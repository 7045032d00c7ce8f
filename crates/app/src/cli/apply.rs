use clap::Args;
use coupons::{
    coupons::validity::parse_timestamp,
    input::UnknownFields,
    now,
    products::{Product, ProductInput},
};
use coupons_app::{context::AppContext, domain::coupons::apply_coupon};
use jiff::civil::DateTime;
use serde_json::Map;

use super::{failure, invalid, output};

#[derive(Debug, Args)]
pub(crate) struct ApplyCouponArgs {
    /// Coupon name
    coupon: String,

    /// Product as a JSON document
    #[arg(long, conflicts_with_all = ["product_name", "price", "category"])]
    product: Option<String>,

    /// Product name
    #[arg(long, required_unless_present = "product")]
    product_name: Option<String>,

    /// Product price
    #[arg(long, required_unless_present = "product", allow_negative_numbers = true)]
    price: Option<i64>,

    /// Product category
    #[arg(long, required_unless_present = "product")]
    category: Option<String>,

    /// Evaluate validity at this date or date-time instead of now
    #[arg(long)]
    at: Option<String>,

    /// Ignore unknown fields in the product JSON
    #[arg(long, requires = "product")]
    permissive: bool,
}

impl ApplyCouponArgs {
    fn product(&self) -> Result<Product, String> {
        if let Some(json) = &self.product {
            let unknown = if self.permissive {
                UnknownFields::Ignore
            } else {
                UnknownFields::Reject
            };

            return Product::parse(json, unknown).map_err(invalid);
        }

        let input = ProductInput {
            name: self.product_name.clone().unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            extra: Map::new(),
        };

        Product::from_input(input, UnknownFields::Reject).map_err(invalid)
    }

    fn at(&self) -> Result<DateTime, String> {
        self.at.as_deref().map_or_else(
            || Ok(now()),
            |at| parse_timestamp("at", at).map_err(invalid),
        )
    }
}

pub(crate) async fn run(ctx: &AppContext, args: ApplyCouponArgs) -> Result<(), String> {
    let product = args.product()?;
    let at = args.at()?;

    let application = apply_coupon(ctx.coupons.as_ref(), &args.coupon, product, at)
        .await
        .map_err(failure)?;

    println!("{}", output::application_table(&application));

    Ok(())
}
