use coupons::coupons::Coupon;
use coupons_app::domain::coupons::CouponApplication;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

const NONE: &str = "-";

pub(crate) fn coupons_table(coupons: &[Coupon]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Name",
        "Discount",
        "Category",
        "Price Above",
        "Valid From",
        "Valid Until",
    ]);

    for coupon in coupons {
        let condition = coupon.condition();
        let validity = coupon.validity();

        builder.push_record([
            coupon.name().to_string(),
            coupon.discount().to_string(),
            condition
                .and_then(|condition| condition.category)
                .map_or_else(|| NONE.to_string(), |category| category.to_string()),
            condition
                .and_then(|condition| condition.price_above)
                .map_or_else(|| NONE.to_string(), |price| price.to_string()),
            validity.map_or_else(|| NONE.to_string(), |validity| validity.start().to_string()),
            validity.map_or_else(|| NONE.to_string(), |validity| validity.end().to_string()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    table.to_string()
}

pub(crate) fn application_table(application: &CouponApplication) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "Coupon",
        "Discount",
        "Product",
        "Category",
        "Price",
        "Discounted Price",
    ]);

    builder.push_record([
        application.coupon.name().to_string(),
        application.coupon.discount().to_string(),
        application.product.name().to_string(),
        application.product.category().to_string(),
        application.product.price().to_string(),
        application.discounted_price.to_string(),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(4..6), Alignment::right());

    table.to_string()
}
