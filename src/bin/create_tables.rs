use anyhow::Result;
use dwhloader::{runner, warehouse, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Drop and recreate every warehouse table. Run this before `etl`.
#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = Config::load()?;
    let client = warehouse::connect(&config.cluster).await?;

    info!("dropping");
    runner::drop_tables(&client).await?;

    info!("creating");
    runner::create_tables(&client).await?;

    info!("schema ready");
    Ok(())
}
