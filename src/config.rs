//! Server configuration.
//!
//! Resolution order: built-in defaults, then an optional TOML file
//! (`SERVER_CONFIG` path or `server.toml` in the working directory), then
//! environment variables (`HOST`, `PORT`, `RUST_LOG`).

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default configuration file name searched in the working directory.
const DEFAULT_CONFIG_FILE: &str = "server.toml";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tracing filter directive (overridden by `RUST_LOG`)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    /// Parse a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config file {}", path.as_ref().display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.as_ref().display()))
    }

    /// Load configuration: defaults, optional file, then env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match env::var("SERVER_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Ok(filter) = env::var("RUST_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ServerConfig = toml::from_str("port = 9090").unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_parse_full_toml() {
        let config: ServerConfig =
            toml::from_str("host = \"127.0.0.1\"\nport = 3000\nlog_filter = \"debug\"").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.log_filter, "debug");
    }
}
