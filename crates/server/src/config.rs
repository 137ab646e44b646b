use database::db::PoolSettings;
use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:5176",
    "http://localhost:8080",
    "http://localhost:8081",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub pool: PoolSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PoolSettings::default();

        let pool = PoolSettings {
            max_connections: parse_or(&lookup, "DB_POOL_MAX", defaults.max_connections)?,
            min_connections: parse_or(&lookup, "DB_POOL_MIN", defaults.min_connections)?,
            acquire_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DB_POOL_ACQUIRE_MS",
                defaults.acquire_timeout.as_millis() as u64,
            )?),
            idle_timeout: Duration::from_millis(parse_or(
                &lookup,
                "DB_POOL_IDLE_MS",
                defaults.idle_timeout.as_millis() as u64,
            )?),
        };

        let cors_origins = match non_empty(&lookup, "CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            host: parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url: database_url(&lookup)?,
            cors_origins,
            pool,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// `DATABASE_URL` wins; otherwise a MySQL URL is assembled from the `DB_*` variables
fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(url) = non_empty(lookup, "DATABASE_URL") {
        return Ok(url);
    }

    let host = non_empty(lookup, "DB_HOST").ok_or(ConfigError::Missing("DB_HOST"))?;
    let user = non_empty(lookup, "DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
    let name = non_empty(lookup, "DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;
    let port: u16 = parse_or(lookup, "DB_PORT", DEFAULT_DB_PORT)?;
    let password = lookup("DB_PASSWORD")
        .or_else(|| lookup("DB_PW"))
        .unwrap_or_default();

    if password.is_empty() {
        Ok(format!("mysql://{user}@{host}:{port}/{name}"))
    } else {
        Ok(format!("mysql://{user}:{password}@{host}:{port}/{name}"))
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match non_empty(lookup, key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
