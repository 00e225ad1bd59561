//! # Server Configuration
//!
//! The redirect server reads a small YAML file, normally pointed to by the
//! `CONFIG_FILE` environment variable:
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8080
//! map_file: mapping.yaml
//! watch: true
//! ```
//!
//! Only `map_file` is required. Relative paths are resolved against the
//! process working directory, which is also where the load-test scenario
//! writes its `mapping.yaml`. Unknown keys are ignored.

use serde::Deserialize;
use std::fs;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Redirect server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: `0.0.0.0`)
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind (default: `8080`)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Mapping document to serve
    pub map_file: PathBuf,
    /// Reload the mapping when the file changes (default: `true`)
    #[serde(default = "default_watch")]
    pub watch: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_watch() -> bool {
    true
}

impl ServerConfig {
    pub fn from_yaml(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(document)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&document)
    }

    /// `host:port` string suitable for binding. IPv6 literals are bracketed.
    pub fn bind_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => SocketAddr::from((ip, self.port)).to_string(),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_yaml("map_file: mapping.yaml\n").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.map_file, PathBuf::from("mapping.yaml"));
        assert!(config.watch);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_full_config_ignores_unknown_keys() {
        let config = ServerConfig::from_yaml(
            "host: 127.0.0.1\nport: 9000\nmap_file: /etc/yamlink/map.yaml\nwatch: false\nrefresh_interval: 5\n",
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert!(!config.watch);
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let config =
            ServerConfig::from_yaml("host: \"::\"\nport: 8080\nmap_file: mapping.yaml\n").unwrap();
        assert_eq!(config.bind_addr(), "[::]:8080");
        assert!(config.bind_addr().parse::<SocketAddr>().is_ok());

        let config = ServerConfig {
            host: "::1".to_string(),
            ..config
        };
        assert_eq!(config.bind_addr(), "[::1]:8080");
    }

    #[test]
    fn test_bracketed_and_named_hosts_pass_through() {
        let mut config = ServerConfig::from_yaml("map_file: mapping.yaml\n").unwrap();
        config.host = "[::1]".to_string();
        assert_eq!(config.bind_addr(), "[::1]:8080");
        config.host = "localhost".to_string();
        assert_eq!(config.bind_addr(), "localhost:8080");
    }

    #[test]
    fn test_missing_map_file() {
        assert!(matches!(
            ServerConfig::from_yaml("port: 9000\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ServerConfig::load("/definitely/not/here.yaml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
