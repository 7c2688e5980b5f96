// src/config/mod.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

/// Config file read when `DWH_CONFIG` is not set.
const DEFAULT_CONFIG_PATH: &str = "dwh.yaml";

/// Everything the loader needs: where the cluster is and where the staged
/// JSON lives.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub staging: StagingConfig,
}

/// Warehouse connection parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterConfig {
    pub host: String,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

/// Parameters for the COPY statements: the two object-store prefixes, the
/// IAM role the cluster assumes to read them, and an optional JSONPaths file
/// mapping event fields to staging columns.
#[derive(Debug, Clone, Deserialize)]
pub struct StagingConfig {
    pub log_data: String,
    pub song_data: String,
    pub iam_role: String,
    pub log_jsonpath: Option<String>,
}

impl Config {
    /// Load the config from `DWH_CONFIG`, falling back to `dwh.yaml` in the
    /// working directory.
    pub fn load() -> Result<Self> {
        let path = env::var("DWH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(&path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

impl ClusterConfig {
    /// Key/value connection string in the form tokio-postgres expects.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} dbname={} user={} password={} port={}",
            self.host, self.dbname, self.user, self.password, self.port
        )
    }
}
