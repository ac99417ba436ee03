use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://ipt-keys.vercel.app/api";
pub const API_KEY_NAME: &str = "MY_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), read_secret)
    }

    /// Same as [`Config::load`] with the environment and secret store swapped out.
    pub fn from_lookup<V, S>(var: V, secret: S) -> Result<Self, ConfigError>
    where
        V: Fn(&str) -> Option<String>,
        S: Fn(&str) -> Option<String>,
    {
        let port = try_load(&var, "RUST_PORT", DEFAULT_PORT)?;
        let upstream_url = try_load(&var, "UPSTREAM_URL", DEFAULT_UPSTREAM_URL.to_string())?;

        let api_key = var(API_KEY_NAME).or_else(|| secret(API_KEY_NAME));
        if api_key.is_none() {
            warn!("{API_KEY_NAME} not found, upstream calls will carry an empty key");
        }

        Ok(Self {
            port,
            upstream_url,
            api_key,
        })
    }

    /// The key sent upstream. Missing keys go out as an empty string, they are not rejected here.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

fn try_load<V, T>(var: &V, key: &'static str, default: T) -> Result<T, ConfigError>
where
    V: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(value) = var(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }
    })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("No {secret_name} secret file: {e}");
        })
        .ok()
}
