//! Bootstrap trainer provisioning tool.
//!
//! Student-facing endpoints resolve their tenant through the default
//! trainer; until that trainer exists, student login fails with a fatal
//! configuration error. Run this once after deploying.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-trainer --phone 09120000000

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::env;

use gympanel_api::db;
use gympanel_api::services::tenant::TenantService;

#[derive(Parser, Debug)]
#[command(name = "seed-trainer", about = "Provision the bootstrap trainer")]
struct Args {
    /// Phone number of the bootstrap trainer (defaults to
    /// DEFAULT_TRAINER_PHONE, then 09120000000).
    #[arg(long)]
    phone: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let phone = args
        .phone
        .or_else(|| env::var("DEFAULT_TRAINER_PHONE").ok())
        .unwrap_or_else(|| "09120000000".to_string());

    println!("=== Seed Bootstrap Trainer ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let trainer_id = TenantService::ensure_trainer_exists(&pool, &phone)
        .await
        .context("Failed to provision trainer")?;

    println!("Bootstrap trainer ready: phone {phone} (id {trainer_id})");
    Ok(())
}
