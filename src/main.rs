//! HTTP server for the payroll engine.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::repository::{InMemoryStore, SeedData};

const DEFAULT_CONFIG_DIR: &str = "./config/payroll";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading payroll configuration from {}", config_dir))?;
    info!(
        config_dir = %config_dir,
        company = %config.policy().company.name,
        holidays = config.holidays().len(),
        "Configuration loaded"
    );

    let store = match std::env::var("PAYROLL_SEED_FILE") {
        Ok(seed_file) => {
            let seed = SeedData::from_file(&seed_file)
                .with_context(|| format!("loading seed data from {}", seed_file))?;
            info!(
                seed_file = %seed_file,
                employees = seed.employees.len(),
                attendance = seed.attendance.len(),
                leaves = seed.leaves.len(),
                "Seed data loaded"
            );
            InMemoryStore::from_seed(seed)
        }
        Err(_) => InMemoryStore::new(),
    };

    let app = create_router(AppState::in_memory(Arc::new(store), &config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!(bind_addr = %bind_addr, "Payroll engine listening");

    axum::serve(listener, app).await?;

    Ok(())
}
