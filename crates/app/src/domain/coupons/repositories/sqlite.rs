//! SQLite Coupons Repository

use jiff::civil::DateTime;
use sqlx::{
    FromRow, Row, Sqlite, Transaction, query,
    query::QueryAs,
    query_as,
    sqlite::{SqliteArguments, SqliteRow},
};

use crate::domain::coupons::records::CouponRecord;

const LIST_COUPONS_SQL: &str = include_str!("sql/sqlite/list_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("sql/sqlite/get_coupon.sql");
const LOCK_COUPON_SQL: &str = include_str!("sql/sqlite/lock_coupon.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/sqlite/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/sqlite/update_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("sql/sqlite/delete_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCouponsRepository;

impl SqliteCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CouponRecord>, sqlx::Error> {
        query_as::<Sqlite, CouponRecord>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Sqlite, CouponRecord>(GET_COUPON_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    /// Reads a coupon through a no-op write so the row is read under the write lock.
    pub(crate) async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Sqlite, CouponRecord>(LOCK_COUPON_SQL)
            .bind(name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: &CouponRecord,
    ) -> Result<CouponRecord, sqlx::Error> {
        bind_record(query_as::<Sqlite, CouponRecord>(CREATE_COUPON_SQL), coupon)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: &CouponRecord,
    ) -> Result<CouponRecord, sqlx::Error> {
        bind_record(query_as::<Sqlite, CouponRecord>(UPDATE_COUPON_SQL), coupon)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
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
    query: QueryAs<'q, Sqlite, CouponRecord, SqliteArguments<'q>>,
    coupon: &'q CouponRecord,
) -> QueryAs<'q, Sqlite, CouponRecord, SqliteArguments<'q>> {
    query
        .bind(&coupon.name)
        .bind(coupon.discount)
        .bind(coupon.is_percent)
        .bind(coupon.condition_category.as_deref())
        .bind(coupon.condition_price_above)
        .bind(coupon.validity_start.map(|at| at.to_string()))
        .bind(coupon.validity_end.map(|at| at.to_string()))
}

fn decode_timestamp(row: &SqliteRow, column: &str) -> sqlx::Result<Option<DateTime>> {
    row.try_get::<Option<String>, _>(column)?
        .map(|text| text.parse::<DateTime>())
        .transpose()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(error),
        })
}

impl<'r> FromRow<'r, SqliteRow> for CouponRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            discount: row.try_get("discount")?,
            is_percent: row.try_get("is_percent")?,
            condition_category: row.try_get("condition_category")?,
            condition_price_above: row.try_get("condition_price_above")?,
            validity_start: decode_timestamp(row, "validity_start")?,
            validity_end: decode_timestamp(row, "validity_end")?,
        })
    }
}
