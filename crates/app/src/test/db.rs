//! Postgres test databases

use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;

use crate::database::POSTGRES_MIGRATIONS;

const CREDENTIALS: &str = "coupons_test:coupons_test_password";

/// Shared PostgreSQL container that starts once and is reused across all tests
static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static DATABASE_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user("coupons_test")
        .with_password("coupons_test_password")
        .with_db_name("coupons_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn server_url() -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{CREDENTIALS}@{host}:{port}")
}

/// Isolated database inside the shared container, migrated and ready for use.
///
/// Every test gets its own database, so there is no cleanup between tests.
#[derive(Debug, Clone)]
pub(crate) struct TestDb {
    pub(crate) pool: PgPool,
}

impl TestDb {
    pub(crate) async fn new() -> Self {
        let name = format!(
            "coupons_test_{}_{}",
            std::process::id(),
            DATABASE_COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        let server = server_url().await;

        let mut conn = PgConnection::connect(&format!("{server}/postgres"))
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&format!("{server}/{name}"))
            .await
            .expect("Failed to create pool for database");

        POSTGRES_MIGRATIONS
            .run(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self { pool }
    }
}
