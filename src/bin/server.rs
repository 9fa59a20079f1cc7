//! HCM HTTP Server Binary
//!
//! This is the main entry point for the attendance REST API server.
//! It loads configuration, builds the repository, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hcm-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Storage backend (default: local)
//! - `RUST_LOG`: Log filter (default: info)
//! - `SERVER_CONFIG`: Path to a TOML configuration file

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hcm_rust::config::ServerConfig;
use hcm_rust::db::RepositoryFactory;
use hcm_rust::http::{create_router, AppState};
use hcm_rust::services::SystemClock;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter.clone()))
        .with_target(true)
        .init();

    info!("Starting HCM HTTP Server");

    // Build the repository and shared state
    let repository = RepositoryFactory::from_env();
    info!("Repository initialized successfully");

    let state = AppState::new(repository, Arc::new(SystemClock));

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
