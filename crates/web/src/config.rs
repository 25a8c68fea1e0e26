use anyhow::{Context, Result};
use importer::{TbaSettings, sources::tba::DEFAULT_BASE_URL};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub tba_api_key: Option<String>,
    pub tba_base_url: String,
    pub tba_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            tba_api_key: std::env::var("TBA_API_KEY").ok(),
            tba_base_url: std::env::var("TBA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            tba_timeout_secs: match std::env::var("TBA_TIMEOUT_SECS") {
                Ok(value) => value.parse().context("TBA_TIMEOUT_SECS must be a number")?,
                Err(_) => 30,
            },
        })
    }

    pub fn tba_settings(&self) -> TbaSettings {
        TbaSettings {
            api_key: self.tba_api_key.clone(),
            base_url: self.tba_base_url.clone(),
            timeout: Duration::from_secs(self.tba_timeout_secs),
        }
    }
}
