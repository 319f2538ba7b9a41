mod dto;
mod error;
mod handlers;
mod routes;
mod services;
mod state;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Result;
use flamecheck_config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use state::ServerState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr;

    let state = Arc::new(ServerState::init(config).await?);
    let app = routes::build(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
