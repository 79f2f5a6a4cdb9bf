use poker_api::{app, build_state, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Poker coach API listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
