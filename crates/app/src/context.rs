//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{Database, DatabaseError},
    domain::coupons::{CouponsService, PgCouponsService, SqliteCouponsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialise database")]
    Database(#[from] DatabaseError),
}

#[derive(Clone)]
pub struct AppContext {
    pub coupons: Arc<dyn CouponsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let database = Database::connect(url).await?;

        database.migrate().await?;

        let coupons: Arc<dyn CouponsService> = match database {
            Database::Postgres(pool) => Arc::new(PgCouponsService::new(pool)),
            Database::Sqlite(pool) => Arc::new(SqliteCouponsService::new(pool)),
        };

        Ok(Self { coupons })
    }
}
