use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
        }
    }
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("REGISTRAR_HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("REGISTRAR_HOST is invalid: {}", raw)))?,
            None => defaults.host,
        };
        let port = match lookup("REGISTRAR_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("REGISTRAR_PORT is invalid: {}", raw)))?,
            None => defaults.port,
        };

        Ok(Self { host, port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
