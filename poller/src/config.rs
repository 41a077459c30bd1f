use secrecy::SecretString;
use std::time::Duration;

use crate::DEFAULT_REFRESH_INTERVAL;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

pub struct Config {
    /// Backend origin, e.g. "http://127.0.0.1:8000"
    pub backend_url: String,
    pub refresh_interval: Duration,
    /// Bearer token for authenticated requests, if any
    pub api_token: Option<SecretString>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source. Empty values count as
    /// unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend_url = var("BACKEND_URL")
            .ok_or(ConfigError::Missing("BACKEND_URL"))?
            .trim_end_matches('/')
            .to_string();

        let refresh_interval = match var("REFRESH_INTERVAL_MS") {
            None => DEFAULT_REFRESH_INTERVAL,
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REFRESH_INTERVAL_MS",
                        value,
                    });
                }
            },
        };

        let api_token = var("API_TOKEN").map(SecretString::from);

        Ok(Config {
            backend_url,
            refresh_interval,
            api_token,
        })
    }
}
