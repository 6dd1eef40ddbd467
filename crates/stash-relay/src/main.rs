//! Stash relay binary.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use stash_relay::{create_router, RelayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("RELAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5002);
    let api_base = std::env::var("API_BASE")
        .unwrap_or_else(|_| "http://localhost:5001/api".to_string());

    let state = RelayState {
        client: reqwest::Client::new(),
        api_base: api_base.clone(),
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%api_base, "relay running on port {}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
