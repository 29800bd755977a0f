use anyhow::Context;
use std::{net::SocketAddr, time::Duration};

use miltontv_core::constants::{DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_REFRESH_TICKER_DELAY_MS};

const DEFAULT_REFRESH_INITIAL_DELAY_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub refresh_enabled: bool,
    pub refresh_interval: Duration,
    pub refresh_initial_delay: Duration,
    pub refresh_ticker_delay: Duration,
    pub finnhub_api_key: String,
    pub youtube_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/app.db".to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            refresh_enabled: true,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
            refresh_initial_delay: Duration::from_secs(DEFAULT_REFRESH_INITIAL_DELAY_SECS),
            refresh_ticker_delay: Duration::from_millis(DEFAULT_REFRESH_TICKER_DELAY_MS),
            finnhub_api_key: String::new(),
            youtube_api_key: String::new(),
        }
    }
}

fn parse_u64(name: &str, raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {} '{}', expected a whole number", name, raw))
}

fn parse_bool(name: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {} '{}', expected true or false", name, raw),
    }
}

fn env_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(raw) => parse_u64(name, &raw),
        Err(_) => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> anyhow::Result<bool> {
    match std::env::var(name) {
        Ok(raw) => parse_bool(name, &raw),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Reads `MTV_*` variables (and `.env`), falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("MTV_LISTEN_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid MTV_LISTEN_ADDR '{}'", raw))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("MTV_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("MTV_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(env_u64("MTV_REQUEST_TIMEOUT_MS", 30_000)?),
            refresh_enabled: env_bool("MTV_REFRESH_ENABLED", defaults.refresh_enabled)?,
            refresh_interval: Duration::from_secs(env_u64(
                "MTV_REFRESH_INTERVAL_SECS",
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?),
            refresh_initial_delay: Duration::from_secs(env_u64(
                "MTV_REFRESH_INITIAL_DELAY_SECS",
                DEFAULT_REFRESH_INITIAL_DELAY_SECS,
            )?),
            refresh_ticker_delay: Duration::from_millis(env_u64(
                "MTV_REFRESH_TICKER_DELAY_MS",
                DEFAULT_REFRESH_TICKER_DELAY_MS,
            )?),
            finnhub_api_key: std::env::var("FINNHUB_API_KEY").unwrap_or_default(),
            youtube_api_key: std::env::var("YOUTUBE_API_KEY").unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout.is_zero() {
            anyhow::bail!("MTV_REQUEST_TIMEOUT_MS must be greater than zero");
        }
        if self.refresh_enabled && self.refresh_interval.is_zero() {
            anyhow::bail!("MTV_REFRESH_INTERVAL_SECS must be greater than zero");
        }
        Ok(())
    }
}
