use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_file: PathBuf,
    pub static_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let host = lookup("COMMUNITY_HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = lookup("COMMUNITY_PORT")
            .unwrap_or_else(|| "5174".into())
            .parse()
            .context("COMMUNITY_PORT must be a port number")?;
        let db_file = lookup("COMMUNITY_DB_FILE")
            .unwrap_or_else(|| "data/community.db".into())
            .into();
        let static_root = lookup("COMMUNITY_STATIC_ROOT")
            .unwrap_or_else(|| ".".into())
            .into();

        Ok(Self {
            host,
            port,
            db_file,
            static_root,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
