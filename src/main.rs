use std::sync::Arc;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::PayrollError;
use payroll_engine::store::{InMemoryStore, SeedData};
use tracing::{info, warn};

const DEFAULT_CONFIG_PATH: &str = "./config/payroll.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payroll_engine=info,tower_http=info".into()),
        )
        .init();

    let config_path =
        std::env::var("PAYROLL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = match ConfigLoader::load(&config_path) {
        Ok(loader) => loader,
        Err(PayrollError::ConfigNotFound { path }) => {
            let loader = ConfigLoader::default();
            warn!(
                path = %path,
                utc_offset_minutes = loader.config().calendar.utc_offset_minutes,
                "Configuration file not found, using built-in defaults; month boundaries follow UTC"
            );
            loader
        }
        Err(err) => return Err(err.into()),
    };

    let bind_addr = loader.config().server.bind_addr.clone();
    info!(
        config = %config_path,
        utc_offset_minutes = loader.config().calendar.utc_offset_minutes,
        working_days_per_month = loader.config().salary.working_days_per_month,
        "Configuration loaded"
    );

    let store = Arc::new(InMemoryStore::new());
    if let Some(seed_path) = loader.config().store.seed_path.as_deref() {
        let (employees, visits) = SeedData::load(seed_path)?.apply(store.as_ref()).await?;
        info!(seed = %seed_path, employees, visits, "Store seeded");
    }

    let state = AppState::in_memory(loader, store);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "payroll-engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
