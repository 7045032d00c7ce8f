//! Postgres Coupons Repository

use jiff_sqlx::DateTime as SqlxDateTime;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query,
    query::QueryAs,
    query_as,
};

use crate::domain::coupons::records::CouponRecord;

const LIST_COUPONS_SQL: &str = include_str!("sql/postgres/list_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/postgres/get_coupon.sql");
const LOCK_COUPON_SQL: &str = include_str!("sql/postgres/lock_coupon.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/postgres/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/postgres/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/postgres/delete_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(GET_COUPON_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a coupon and hold a row lock on it until the transaction ends.
    pub(crate) async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_COUPON_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &CouponRecord,
    ) -> Result<CouponRecord, sqlx::Error> {
        bind_record(query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL), coupon)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &CouponRecord,
    ) -> Result<CouponRecord, sqlx::Error> {
        bind_record(query_as::<Postgres, CouponRecord>(UPDATE_COUPON_SQL), coupon)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(name)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_record<'q>(
    query: QueryAs<'q, Postgres, CouponRecord, PgArguments>,
    coupon: &'q CouponRecord,
) -> QueryAs<'q, Postgres, CouponRecord, PgArguments> {
    query
        .bind(&coupon.name)
        .bind(coupon.discount)
        .bind(coupon.is_percent)
        .bind(coupon.condition_category.as_deref())
        .bind(coupon.condition_price_above)
        .bind(coupon.validity_start.map(SqlxDateTime::from))
        .bind(coupon.validity_end.map(SqlxDateTime::from))
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            discount: row.try_get("discount")?,
            is_percent: row.try_get("is_percent")?,
            condition_category: row.try_get("condition_category")?,
            condition_price_above: row.try_get("condition_price_above")?,
            validity_start: row
                .try_get::<Option<SqlxDateTime>, _>("validity_start")?
                .map(SqlxDateTime::to_jiff),
            validity_end: row
                .try_get::<Option<SqlxDateTime>, _>("validity_end")?
                .map(SqlxDateTime::to_jiff),
        })
    }
}
