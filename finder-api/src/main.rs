use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use finder_api::{app, AppState};
use finder_infra::{AmadeusClient, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "finder_api=debug,finder_core=info,finder_infra=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;

    let provider = AmadeusClient::new(&config.amadeus).context("Failed to create Amadeus client")?;
    tracing::info!("Using Amadeus API at {}", provider.base_url());

    let app = app(AppState::new(Arc::new(provider)));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
