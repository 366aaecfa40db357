use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use gs_prospectus::{Endpoints, XanoClient};
use gs_web::{AppState, router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    gs_prospectus::init_tracing();

    let addr = std::env::var("GS_WEB_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let config_path = std::env::var("GS_CONFIG").map(PathBuf::from).ok();

    let endpoints = Endpoints::from_env_and_file(config_path.as_deref())?;
    info!(revenue = %endpoints.revenue, kpis = %endpoints.kpis, costs = %endpoints.costs, "Xano endpoints");

    let client = XanoClient::new(endpoints)?;
    let app = router(AppState { client });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
