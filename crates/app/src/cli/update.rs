use clap::Args;
use coupons::{
    coupons::{CouponUpdate, CouponUpdateInput, RawDiscount},
    input::UnknownFields,
};
use coupons_app::context::AppContext;
use serde_json::Map;

use super::{condition_input, failure, invalid, output, validity_input};

#[derive(Debug, Args)]
pub(crate) struct UpdateCouponArgs {
    /// Update as a JSON document; `name` selects the coupon
    #[arg(
        long,
        conflicts_with_all = ["name", "discount", "category", "price_above", "start", "end"]
    )]
    json: Option<String>,

    /// Name of the coupon to update
    #[arg(long, required_unless_present = "json")]
    name: Option<String>,

    /// Replacement discount, such as `10` or `10%`
    #[arg(long)]
    discount: Option<String>,

    /// Replacement category restriction
    #[arg(long)]
    category: Option<String>,

    /// Replacement price threshold
    #[arg(long)]
    price_above: Option<i64>,

    /// Replacement validity start
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Replacement validity end
    #[arg(long, requires = "start")]
    end: Option<String>,
}

impl UpdateCouponArgs {
    fn into_update(self) -> Result<CouponUpdate, String> {
        if let Some(json) = self.json {
            return CouponUpdate::parse(&json, UnknownFields::Reject).map_err(invalid);
        }

        let input = CouponUpdateInput {
            name: self.name.unwrap_or_default(),
            discount: self.discount.map(RawDiscount::Text),
            condition: condition_input(self.category, self.price_above),
            validity: validity_input(self.start, self.end),
            extra: Map::new(),
        };

        CouponUpdate::from_input(input, UnknownFields::Reject).map_err(invalid)
    }
}

pub(crate) async fn run(ctx: &AppContext, args: UpdateCouponArgs) -> Result<(), String> {
    let update = args.into_update()?;

    let updated = ctx.coupons.update_coupon(update).await.map_err(failure)?;

    println!("{}", output::coupons_table(std::slice::from_ref(&updated)));

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use coupons::coupons::Discount;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: UpdateCouponArgs,
    }

    fn parse(args: &[&str]) -> Result<CouponUpdate, String> {
        let harness = Harness::try_parse_from(std::iter::once("update").chain(args.iter().copied()))
            .map_err(|error| error.to_string())?;

        harness.args.into_update()
    }

    #[test]
    fn only_given_fields_are_replaced() -> Result<(), String> {
        let update = parse(&["--name", "TEN", "--discount", "20"])?;

        assert_eq!(update.name, "TEN");
        assert_eq!(update.discount, Some(Discount::Fixed(20)));
        assert_eq!(update.condition, None);
        assert_eq!(update.validity, None);

        Ok(())
    }

    #[test]
    fn name_is_required() {
        assert!(parse(&["--discount", "20"]).is_err());
    }
}
