//! Coupons service.

use async_trait::async_trait;
use coupons::coupons::{Coupon, CouponUpdate};
use mockall::automock;
use sqlx::{Connection, PgPool, Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::domain::coupons::{
    errors::CouponsServiceError,
    records::CouponRecord,
    repositories::{postgres::PgCouponsRepository, sqlite::SqliteCouponsRepository},
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    pool: PgPool,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let records = self.repository.list_coupons(&mut tx).await?;

        tx.commit().await?;

        records.into_iter().map(Coupon::try_from).collect()
    }

    async fn get_coupon(&self, name: &str) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let record = self.repository.get_coupon(&mut tx, name).await?;

        tx.commit().await?;

        Coupon::try_from(record)
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(coupon_name = %coupon.name(), backend = "postgres"),
        err
    )]
    async fn create_coupon(&self, coupon: Coupon) -> Result<Coupon, CouponsServiceError> {
        let record = CouponRecord::try_from(&coupon)?;

        let mut tx = self.pool.begin().await?;

        let created = self.repository.create_coupon(&mut tx, &record).await?;

        tx.commit().await?;

        info!("created coupon");

        Coupon::try_from(created)
    }

    #[tracing::instrument(
        name = "coupons.service.update_coupon",
        skip(self, update),
        fields(coupon_name = %update.name, backend = "postgres"),
        err
    )]
    async fn update_coupon(&self, update: CouponUpdate) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let current = Coupon::try_from(self.repository.lock_coupon(&mut tx, &update.name).await?)?;
        let record = CouponRecord::try_from(&current.merge(&update)?)?;

        let updated = self.repository.update_coupon(&mut tx, &record).await?;

        tx.commit().await?;

        info!("updated coupon");

        Coupon::try_from(updated)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(backend = "postgres"),
        err
    )]
    async fn delete_coupon(&self, name: &str) -> Result<(), CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, name).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted coupon");

        Ok(())
    }

    async fn ping(&self) -> Result<(), CouponsServiceError> {
        let mut connection = self.pool.acquire().await?;

        connection.ping().await?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[derive(Debug, Clone)]
pub struct SqliteCouponsService {
    pool: SqlitePool,
    repository: SqliteCouponsRepository,
}

impl SqliteCouponsService {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            repository: SqliteCouponsRepository::new(),
        }
    }

    /// Transaction that holds the database write lock from its first statement, so concurrent
    /// writers queue on the busy timeout instead of failing to upgrade a read lock.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }
}

#[async_trait]
impl CouponsService for SqliteCouponsService {
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let records = self.repository.list_coupons(&mut tx).await?;

        tx.commit().await?;

        records.into_iter().map(Coupon::try_from).collect()
    }

    async fn get_coupon(&self, name: &str) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.pool.begin().await?;

        let record = self.repository.get_coupon(&mut tx, name).await?;

        tx.commit().await?;

        Coupon::try_from(record)
    }

    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(coupon_name = %coupon.name(), backend = "sqlite"),
        err
    )]
    async fn create_coupon(&self, coupon: Coupon) -> Result<Coupon, CouponsServiceError> {
        let record = CouponRecord::try_from(&coupon)?;

        let mut tx = self.begin_write().await?;

        let created = self.repository.create_coupon(&mut tx, &record).await?;

        tx.commit().await?;

        info!("created coupon");

        Coupon::try_from(created)
    }

    #[tracing::instrument(
        name = "coupons.service.update_coupon",
        skip(self, update),
        fields(coupon_name = %update.name, backend = "sqlite"),
        err
    )]
    async fn update_coupon(&self, update: CouponUpdate) -> Result<Coupon, CouponsServiceError> {
        let mut tx = self.begin_write().await?;

        let current = Coupon::try_from(self.repository.lock_coupon(&mut tx, &update.name).await?)?;
        let record = CouponRecord::try_from(&current.merge(&update)?)?;

        let updated = self.repository.update_coupon(&mut tx, &record).await?;

        tx.commit().await?;

        info!("updated coupon");

        Coupon::try_from(updated)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(backend = "sqlite"),
        err
    )]
    async fn delete_coupon(&self, name: &str) -> Result<(), CouponsServiceError> {
        let mut tx = self.begin_write().await?;

        let rows_affected = self.repository.delete_coupon(&mut tx, name).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted coupon");

        Ok(())
    }

    async fn ping(&self) -> Result<(), CouponsServiceError> {
        let mut connection = self.pool.acquire().await?;

        connection.ping().await?;

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieves every stored coupon.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Retrieve a single coupon by name.
    async fn get_coupon(&self, name: &str) -> Result<Coupon, CouponsServiceError>;

    /// Stores a new coupon. Fails with `AlreadyExists` when the name is taken.
    async fn create_coupon(&self, coupon: Coupon) -> Result<Coupon, CouponsServiceError>;

    /// Merges the update into the stored coupon of the same name and returns the result.
    async fn update_coupon(&self, update: CouponUpdate) -> Result<Coupon, CouponsServiceError>;

    /// Deletes a coupon by name.
    async fn delete_coupon(&self, name: &str) -> Result<(), CouponsServiceError>;

    /// Checks that the storage accepts connections.
    async fn ping(&self) -> Result<(), CouponsServiceError>;

    /// Releases the underlying connection pool.
    async fn close(&self);
}
