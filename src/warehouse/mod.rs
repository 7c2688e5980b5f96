// src/warehouse/mod.rs

use crate::config::ClusterConfig;
use anyhow::{Context, Result};
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

/// Open a single connection to the warehouse. The connection driver runs on
/// its own task for the life of the client; the client itself is dropped at
/// the end of the invocation, which closes the connection.
pub async fn connect(cluster: &ClusterConfig) -> Result<Client> {
    let (client, connection) = tokio_postgres::connect(&cluster.connection_string(), NoTls)
        .await
        .with_context(|| format!("connecting to {}:{}", cluster.host, cluster.port))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            error!("warehouse connection error: {}", e);
        }
    });

    Ok(client)
}

/// Run statements one at a time, in order. Each goes over the simple-query
/// path so it commits on its own before the next one starts; a failure skips
/// everything after it and propagates, leaving earlier statements committed.
pub async fn execute_each<I, S>(client: &Client, statements: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for statement in statements {
        let sql = statement.as_ref();
        debug!(statement = %summarize(sql), "executing");
        client
            .batch_execute(sql)
            .await
            .with_context(|| format!("executing `{}`", summarize(sql)))?;
    }
    Ok(())
}

/// First few words of a statement, whitespace-collapsed, for log lines and
/// error context.
fn summarize(sql: &str) -> String {
    const MAX_WORDS: usize = 6;
    let mut words: Vec<&str> = sql.split_whitespace().take(MAX_WORDS + 1).collect();
    let truncated = words.len() > MAX_WORDS;
    words.truncate(MAX_WORDS);
    let mut summary = words.join(" ");
    if truncated {
        summary.push('…');
    }
    summary
}
