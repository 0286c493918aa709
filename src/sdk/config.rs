use crate::sdk::fare::client::DEFAULT_FARE_URL;
use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FARE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ROUTE_TIMEOUT_SECS: u64 = 15;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Where route overlays come from.
#[derive(Debug, Clone, PartialEq)]
pub enum OrsConfig {
    Remote { api_key: String },
    Local { base_url: String },
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub routing: OrsConfig,
    pub fare_url: String,
    pub fare_timeout: Duration,
    pub route_timeout: Duration,
}

impl AppConfig {
    /// Reads `ORS_API_KEY`, `ORS_LOCAL_URL`, `FARE_API_URL`,
    /// `FARE_TIMEOUT_SECS` and `ROUTE_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let routing = match (non_empty(vars, "ORS_API_KEY"), non_empty(vars, "ORS_LOCAL_URL")) {
            (Some(api_key), _) => OrsConfig::Remote { api_key },
            (None, Some(base_url)) => OrsConfig::Local { base_url },
            (None, None) => OrsConfig::Disabled,
        };

        Ok(Self {
            routing,
            fare_url: non_empty(vars, "FARE_API_URL").unwrap_or_else(|| DEFAULT_FARE_URL.to_string()),
            fare_timeout: seconds(vars, "FARE_TIMEOUT_SECS", DEFAULT_FARE_TIMEOUT_SECS)?,
            route_timeout: seconds(vars, "ROUTE_TIMEOUT_SECS", DEFAULT_ROUTE_TIMEOUT_SECS)?,
        })
    }
}

// A blank value (`ORS_API_KEY=` in a .env file) counts as unset.
fn non_empty(vars: &HashMap<String, String>, name: &'static str) -> Option<String> {
    vars.get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn seconds(
    vars: &HashMap<String, String>,
    name: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match vars.get(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidSeconds {
                name,
                value: raw.clone(),
            }),
    }
}
