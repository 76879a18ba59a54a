mod app;
mod handlers;
mod models;
mod services;
mod utils;

use anyhow::Context;
use app::config::Config;
use services::PaymentService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!("Starting PIX shop backend on port {}", config.server_port);

    let payment_service = PaymentService::from_config(&config)
        .context("failed to build Mercado Pago client")?;
    if payment_service.is_mock_only() {
        warn!("MP_ACCESS_TOKEN not set, serving mock PIX charges only");
    }

    let app = app::router(Arc::new(payment_service));

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return std::future::pending().await;
    }
    info!("Shutdown signal received");
}
