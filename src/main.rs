use anyhow::Result;
use dwhloader::{runner, warehouse, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Full refresh in one invocation: schema rebuild followed by the load. The
/// phases stay strictly ordered, same as running the `create_tables` and
/// `etl` binaries back to back.
#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) read config, open the one connection ─────────────────────
    let config = Config::load()?;
    let client = warehouse::connect(&config.cluster).await?;

    // ─── 3) rebuild the schema from scratch ──────────────────────────
    runner::rebuild_schema(&client).await?;

    // ─── 4) stage from object storage and transform ──────────────────
    runner::run_etl(&client, &config.staging).await?;

    info!("all done");
    Ok(())
}
