//! Administrator bootstrap - creates the admin role and account
//!
//! Run with:
//! ```
//! cargo run -p admin-seed --bin seed_admin
//! ```
//!
//! Connection and bootstrap values come from the environment (or `.env`),
//! see `admin_seed::config::SeedConfig::from_env`.

use std::process::ExitCode;

use admin_seed::config::SeedConfig;
use admin_seed::db::{self, SeedError};
use admin_seed::models::SeedReport;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match seed().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Admin seed failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn seed() -> anyhow::Result<()> {
    let config = SeedConfig::from_env()?;
    let report = db::run(&config).await.map_err(describe)?;
    print_summary(&report, &config);
    Ok(())
}

fn describe(error: SeedError) -> anyhow::Error {
    let hint = match &error {
        SeedError::Connect(_) => {
            "check that PostgreSQL is running and that the host, port, credentials and database name are correct"
        }
        SeedError::Database(_) => {
            "check that the roles and users tables exist with unique constraints on roles.id and users.username"
        }
        SeedError::Config(_) | SeedError::Hash(_) => return error.into(),
    };
    anyhow::Error::new(error).context(hint)
}

fn print_summary(report: &SeedReport, config: &SeedConfig) {
    tracing::info!("Seed completed!");
    tracing::info!(
        "  Role: id={} name={} ({})",
        report.role_id,
        report.role_name,
        report.role_status.as_str()
    );
    tracing::info!(
        "  User {}: id={} name={} username={}",
        report.user_action(),
        report.user.id,
        report.user.name,
        report.user.username
    );
    tracing::info!("==============================================");
    tracing::info!("  First login credentials (rotate after use)");
    tracing::info!("  Username: {}", config.admin.username);
    tracing::info!("  Password: {}", config.admin.password);
    tracing::info!("==============================================");
}
