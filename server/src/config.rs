//! Relay configuration parsed from environment variables.
//!
//! Required:
//! - `APP_ENV`: `development`, `production`, or `test`
//!
//! Optional:
//! - `PORT`: listen port, default 3000
//! - `BIND_ADDR`: listen address, default `0.0.0.0`
//! - `RELAY_CLIENT_QUEUE`: per-client outbound queue capacity, default 256

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_CLIENT_QUEUE: usize = 256;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
    Test,
}

impl FromStr for AppEnv {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, ()> {
        match raw {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub app_env: AppEnv,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub client_queue: usize,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `APP_ENV` is unset and
    /// [`ConfigError::Invalid`] when any variable fails to parse or the
    /// queue capacity is zero.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_env = lookup("APP_ENV").ok_or(ConfigError::Missing("APP_ENV"))?;
        let app_env = parse_value("APP_ENV", &app_env)?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let client_queue = parse_or(&lookup, "RELAY_CLIENT_QUEUE", DEFAULT_CLIENT_QUEUE)?;
        if client_queue == 0 {
            return Err(ConfigError::Invalid { key: "RELAY_CLIENT_QUEUE", value: "0".into() });
        }

        Ok(Self { app_env, bind_addr, port, client_queue })
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { key, value: raw.to_owned() })
}
