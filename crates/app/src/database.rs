//! Database connection management

use std::str::FromStr;

use sqlx::{
    PgPool, SqlitePool,
    migrate::{MigrateError, Migrator},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use thiserror::Error;

/// Migrations for the `PostgreSQL` schema.
pub static POSTGRES_MIGRATIONS: Migrator = sqlx::migrate!("migrations/postgres");

/// Migrations for the `SQLite` schema.
pub static SQLITE_MIGRATIONS: Migrator = sqlx::migrate!("migrations/sqlite");

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("unsupported database URL scheme \"{0}\", expected postgres:// or sqlite://")]
    UnsupportedScheme(String),

    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Storage backend, chosen by database URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Pick the backend for a database URL.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnsupportedScheme`] for anything but `postgres`, `postgresql`
    /// and `sqlite` URLs.
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let scheme = url.split_once(':').map_or(url, |(scheme, _)| scheme);

        match scheme {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Connection pool for whichever backend the URL selected.
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Connect to the database named by `url`.
    ///
    /// `SQLite` files are created when missing. In-memory `SQLite` databases are pinned to a
    /// single connection that is never recycled, since each connection would otherwise see its
    /// own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error when the scheme is unsupported or the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        match Backend::from_url(url)? {
            Backend::Postgres => PgPool::connect(url)
                .await
                .map(Self::Postgres)
                .map_err(DatabaseError::Connect),
            Backend::Sqlite => connect_sqlite(url)
                .await
                .map(Self::Sqlite)
                .map_err(DatabaseError::Connect),
        }
    }

    /// Bring the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error when a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        match self {
            Self::Postgres(pool) => POSTGRES_MIGRATIONS.run(pool).await,
            Self::Sqlite(pool) => SQLITE_MIGRATIONS.run(pool).await,
        }
        .map_err(DatabaseError::Migrate)
    }
}

async fn connect_sqlite(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let in_memory = url.contains(":memory:") || url.contains("mode=memory");

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    pool_options.connect_with(options).await
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn postgres_schemes_select_postgres() -> TestResult {
        assert_eq!(
            Backend::from_url("postgres://user@localhost/coupons")?,
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://user@localhost/coupons")?,
            Backend::Postgres
        );

        Ok(())
    }

    #[test]
    fn sqlite_schemes_select_sqlite() -> TestResult {
        assert_eq!(Backend::from_url("sqlite://coupons.db")?, Backend::Sqlite);
        assert_eq!(Backend::from_url("sqlite::memory:")?, Backend::Sqlite);

        Ok(())
    }

    #[test]
    fn other_schemes_are_rejected() {
        let result = Backend::from_url("mongodb://localhost:27017");

        assert!(
            matches!(&result, Err(DatabaseError::UnsupportedScheme(scheme)) if scheme == "mongodb"),
            "expected UnsupportedScheme, got {result:?}"
        );
    }

    #[tokio::test]
    async fn in_memory_sqlite_connects_and_migrates() -> TestResult {
        let database = Database::connect("sqlite::memory:").await?;

        database.migrate().await?;

        assert!(matches!(database, Database::Sqlite(_)));

        Ok(())
    }
}
