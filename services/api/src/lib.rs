//! RideMate API service
//!
//! REST backend for the RideMate service-booking platform: service listings,
//! bookings and cookie-based session tokens, served under `/api/v1`.

use std::sync::Arc;

use anyhow::Result;
use auth::{CookiePolicy, TokenService};
use axum::Router;
use common::database::{DatabaseConfig, connect_with_retry, health_check};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

use crate::{
    config::AppConfig,
    repositories::{BOOKINGS, PgCollection, SERVICES},
    state::AppState,
};

/// Router with the cross-cutting layers applied
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Connect to the store, serve until a shutdown signal, then close the pool
pub async fn run(config: AppConfig, db_config: DatabaseConfig) -> Result<()> {
    let pool = connect_with_retry(&db_config).await?;
    health_check(&pool).await?;
    info!("Database connection successful");

    let services = PgCollection::open(pool.clone(), SERVICES).await?;
    let bookings = PgCollection::open(pool.clone(), BOOKINGS).await?;
    let token_service = TokenService::new(config.jwt_config())?;

    let app_state = AppState::new(
        Arc::new(services),
        Arc::new(bookings),
        token_service,
        CookiePolicy::new(config.is_production()),
    );
    let app = build_app(app_state, config.cors_layer()?);

    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("RideMate API listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped, closing database pool");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
