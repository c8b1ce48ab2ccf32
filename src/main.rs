use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use roma_backend::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!(?config, "starting");
    roma_backend::serve(config).await
}
