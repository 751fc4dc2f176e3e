use std::env;

use time_deposit_engine::api;
use time_deposit_engine::engine::InterestCalculator;
use time_deposit_engine::service::DepositService;
use time_deposit_engine::store::CsvStore;
use time_deposit_engine::strategy::StrategyRegistry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let store = CsvStore::open(&data_dir);
    let calculator = InterestCalculator::new(StrategyRegistry::builtin());
    let service = DepositService::new(store, calculator);

    let app = api::router(service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, %data_dir, "time deposit service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
