use clap::{Parser, Subcommand};
use coupons::{
    coupons::{ConditionInput, ValidityInput},
    errors::ValidationError,
};
use coupons_app::{context::AppContext, domain::coupons::CouponsServiceError};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

mod apply;
mod create;
mod delete;
mod get;
mod list;
mod output;
mod update;

#[derive(Debug, Parser)]
#[command(name = "coupons", about = "Manage and apply discount coupons", long_about = None)]
pub(crate) struct Cli {
    /// Database URL, `postgres://...` or `sqlite://...`
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        hide_env_values = true,
        default_value = "sqlite://coupons.db"
    )]
    database_url: String,

    /// Diagnostics filter for messages written to stderr
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every coupon
    List,
    /// Show a single coupon
    Get(get::GetCouponArgs),
    /// Create a coupon
    Create(create::CreateCouponArgs),
    /// Change fields of an existing coupon
    Update(update::UpdateCouponArgs),
    /// Delete a coupon
    Delete(delete::DeleteCouponArgs),
    /// Apply a coupon to a product and show the discounted price
    Apply(apply::ApplyCouponArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let _subscriber = fmt()
            .compact()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::new(&self.log_level))
            .try_init();

        let ctx = AppContext::from_database_url(&self.database_url)
            .await
            .map_err(|error| format!("failed to open coupon storage: {error}"))?;

        let result = match self.command {
            Commands::List => list::run(&ctx).await,
            Commands::Get(args) => get::run(&ctx, args).await,
            Commands::Create(args) => create::run(&ctx, args).await,
            Commands::Update(args) => update::run(&ctx, args).await,
            Commands::Delete(args) => delete::run(&ctx, args).await,
            Commands::Apply(args) => apply::run(&ctx, args).await,
        };

        ctx.coupons.close().await;

        result
    }
}

/// User-facing message for a failed coupon operation.
fn failure(error: CouponsServiceError) -> String {
    match error {
        CouponsServiceError::NotFound => "Coupon not found".to_string(),
        CouponsServiceError::AlreadyExists => "Coupon already exists".to_string(),
        CouponsServiceError::NotApplicable => {
            "Coupon is not applicable for this product".to_string()
        }
        CouponsServiceError::Validation(error) => invalid(error),
        other => {
            error!(error = ?other, "coupon storage operation failed");

            "Internal storage error".to_string()
        }
    }
}

fn invalid(error: ValidationError) -> String {
    format!("Invalid input: {error}")
}

fn condition_input(category: Option<String>, price_above: Option<i64>) -> Option<ConditionInput> {
    if category.is_none() && price_above.is_none() {
        return None;
    }

    Some(ConditionInput {
        category,
        price_above,
    })
}

fn validity_input(start: Option<String>, end: Option<String>) -> Option<ValidityInput> {
    Some(ValidityInput {
        start: start?,
        end: end?,
    })
}
