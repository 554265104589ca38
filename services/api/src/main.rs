use anyhow::Result;
use common::database::DatabaseConfig;
use ridemate_api::config::AppConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting RideMate API service");

    let config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    ridemate_api::run(config, db_config).await
}
