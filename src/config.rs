//! Runtime configuration read from `BLOGKV_*` environment variables.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::query::{QueryConfig, DEFAULT_FETCH_CONCURRENCY};

pub const ENV_LISTEN_ADDR: &str = "BLOGKV_LISTEN_ADDR";
pub const ENV_API_ORIGIN: &str = "BLOGKV_API_ORIGIN";
pub const ENV_FETCH_CONCURRENCY: &str = "BLOGKV_FETCH_CONCURRENCY";
pub const ENV_SEED_FILE: &str = "BLOGKV_SEED_FILE";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "BLOGKV_HTTP_TIMEOUT_SECS";

/// An environment variable holding an unusable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}={:?}: {}", self.key, self.value, self.reason)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the API server binds to.
    pub listen_addr: String,
    /// Origin API clients talk to.
    pub api_origin: String,
    pub fetch_concurrency: usize,
    /// JSON array of posts loaded into the store at startup.
    pub seed_file: Option<PathBuf>,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            api_origin: "http://127.0.0.1:8080".to_string(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            seed_file: None,
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Defaults overridden by any `BLOGKV_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ENV_LISTEN_ADDR) {
            config.listen_addr = addr;
        }
        if let Some(origin) = lookup(ENV_API_ORIGIN) {
            config.api_origin = origin;
        }
        if let Some(raw) = lookup(ENV_FETCH_CONCURRENCY) {
            config.fetch_concurrency = parse_positive(ENV_FETCH_CONCURRENCY, &raw)? as usize;
        }
        if let Some(path) = lookup(ENV_SEED_FILE).filter(|p| !p.is_empty()) {
            config.seed_file = Some(PathBuf::from(path));
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = Duration::from_secs(parse_positive(ENV_HTTP_TIMEOUT_SECS, &raw)?);
        }

        Ok(config)
    }

    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn with_seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig::default().with_fetch_concurrency(self.fetch_concurrency)
    }

    #[cfg(feature = "client")]
    pub fn client_config(&self, profile: crate::client::ClientProfile) -> crate::client::ClientConfig {
        crate::client::ClientConfig::new(self.api_origin.clone())
            .with_profile(profile)
            .with_timeout(self.http_timeout)
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero",
        }),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError {
            key,
            value: raw.to_string(),
            reason: "not a whole number",
        }),
    }
}
