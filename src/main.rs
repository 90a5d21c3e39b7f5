use backend::ServerConfig;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        "[SERVER] Starting chessbot playground on {} (turn poll {} ms, timeout {} s)",
        config.addr, config.poll_interval_ms, config.turn_timeout_secs
    );
    backend::serve(config).await
}
