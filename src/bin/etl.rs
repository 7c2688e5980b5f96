use anyhow::Result;
use dwhloader::{runner, warehouse, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Stage the raw JSON from object storage, then populate the fact and
/// dimension tables. Assumes `create_tables` already ran.
#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = Config::load()?;
    let client = warehouse::connect(&config.cluster).await?;

    info!("copying");
    runner::load_staging_tables(&client, &config.staging).await?;

    info!("inserting");
    runner::insert_tables(&client).await?;

    info!("load complete");
    Ok(())
}
