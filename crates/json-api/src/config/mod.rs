//! Server configuration module

use std::net::SocketAddr;

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, RequestLoggingConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Coupons JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "coupons-json", about = "Coupons JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub requests: RequestLoggingConfig,

    /// Coupon storage settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{observability::LogFormat, *};

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "coupons-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--log-format",
            "json",
            "--slow-request-threshold-ms",
            "250",
            "--database-url",
            "sqlite::memory:",
        ])?;

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert!(matches!(config.logging.log_format, LogFormat::Json));
        assert_eq!(config.requests.slow_request_threshold_ms, 250);
        assert_eq!(config.database.database_url, "sqlite::memory:");

        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "coupons-json",
            "--log-format",
            "pretty",
            "--database-url",
            "sqlite::memory:",
        ]);

        assert!(result.is_err(), "expected pretty log format to be rejected");
    }

    #[test]
    fn unsupported_database_scheme_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "coupons-json",
            "--database-url",
            "mysql://localhost/coupons",
        ]);

        assert!(result.is_err(), "expected mysql URL to be rejected");
    }
}
