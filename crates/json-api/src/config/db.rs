//! Database Config

use clap::Args;
use coupons_app::database::{Backend, DatabaseError};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// Coupon store connection string (`postgres://…` or `sqlite://…`)
    #[arg(long, env = "DATABASE_URL", value_parser = storage_url)]
    pub database_url: String,
}

impl DatabaseConfig {
    /// Backend selected by the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnsupportedScheme`] if the URL was set without going through
    /// the argument parser.
    pub fn backend(&self) -> Result<Backend, DatabaseError> {
        Backend::from_url(&self.database_url)
    }
}

/// Rejects unsupported schemes while the arguments are parsed, before any connection attempt.
fn storage_url(url: &str) -> Result<String, DatabaseError> {
    Backend::from_url(url)?;

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn supported_schemes_pass_through() -> TestResult {
        assert_eq!(storage_url("sqlite::memory:")?, "sqlite::memory:");
        assert_eq!(
            storage_url("postgres://coupons@localhost/coupons")?,
            "postgres://coupons@localhost/coupons"
        );

        Ok(())
    }

    #[test]
    fn unsupported_scheme_is_rejected() {
        let result = storage_url("mysql://localhost/coupons");

        assert!(
            matches!(result, Err(DatabaseError::UnsupportedScheme(ref scheme)) if scheme == "mysql"),
            "expected UnsupportedScheme, got {result:?}"
        );
    }
}
