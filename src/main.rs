// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::farm_service::FarmService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::{load_dashboard_config, load_server_config};
use crate::infrastructure::dataset_repository::JsonDatasetRepository;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config().context("loading config/server")?;
    let dashboard_config = load_dashboard_config().context("loading config/dashboard")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(JsonDatasetRepository::load(&server_config.dataset.path).await?);

    // Create services (application layer)
    let farm_service = FarmService::new(repository.clone());
    let dashboard_service = DashboardService::new(repository, dashboard_config.settings());
    let streaming_service = StreamingDashboardService::new(
        dashboard_service.clone(),
        dashboard_config.charts.stream_channel_capacity,
    );

    // Create application state
    let state = Arc::new(AppState {
        farm_service,
        dashboard_service,
        streaming_service,
        default_granularity: dashboard_config.charts.default_granularity,
    });

    // Build router (presentation layer)
    let router = presentation::router(state);

    // Start server
    let addr: SocketAddr = format!(
        "{}:{}",
        server_config.server.bind_address, server_config.server.port
    )
    .parse()
    .context("invalid bind address")?;
    tracing::info!("Starting solar-farm-dashboard on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, router).await?;

    Ok(())
}
