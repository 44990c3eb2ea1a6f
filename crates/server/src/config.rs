//! Server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use directories::ProjectDirs;
use proof_bridge::{BridgeConfig, ConfigError};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Explicit directory for the rolling log file.
    pub log_dir: Option<PathBuf>,
    /// Write a log file to the platform cache directory when `log_dir` is unset.
    pub log_to_file: bool,
    pub bridge: BridgeConfig,
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BIND_ADDR` - Listen address (default: 127.0.0.1:3000)
    /// - `LOG_DIR` - Directory for `proof-server.log` (default: unset)
    /// - `LOG_TO_FILE` - Log to the platform cache directory (default: false)
    ///
    /// Bridge settings are read by [`BridgeConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                value: raw_addr.clone(),
            })?;

        let log_dir = lookup("LOG_DIR")
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let log_to_file = match lookup("LOG_TO_FILE") {
            None => false,
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" | "" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_TO_FILE",
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            log_dir,
            log_to_file,
            bridge: BridgeConfig::from_lookup(&lookup)?,
        })
    }

    /// Directory for the log file, if file logging is enabled.
    pub fn log_directory(&self) -> Option<PathBuf> {
        match &self.log_dir {
            Some(dir) => Some(dir.clone()),
            None if self.log_to_file => default_log_directory(),
            None => None,
        }
    }
}

fn default_log_directory() -> Option<PathBuf> {
    ProjectDirs::from("", "", "memory-proof").map(|dirs| dirs.cache_dir().join("logs"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(config.log_directory().is_none());
        assert!(config.bridge.prover.is_some());
    }

    #[test]
    fn explicit_log_dir_wins() {
        let config = load(&[("LOG_DIR", "/var/log/proofs"), ("LOG_TO_FILE", "false")]).unwrap();
        assert_eq!(config.log_directory(), Some(PathBuf::from("/var/log/proofs")));
    }

    #[test]
    fn bridge_settings_are_forwarded() {
        let config = load(&[("BIND_ADDR", "0.0.0.0:8080"), ("PROVER_ENABLED", "false")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.bridge.prover.is_none());
    }

    #[test]
    fn rejects_bad_address() {
        assert!(matches!(
            load(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidValue { key: "BIND_ADDR", .. })
        ));
    }
}
