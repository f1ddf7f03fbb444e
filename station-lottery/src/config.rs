//! Application configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::heartrails::HeartRailsConfig;

/// Address to listen on (`LOTTERY_BIND_ADDR`).
pub const BIND_ADDR_VAR: &str = "LOTTERY_BIND_ADDR";

/// HeartRails endpoint override (`HEARTRAILS_BASE_URL`).
pub const BASE_URL_VAR: &str = "HEARTRAILS_BASE_URL";

/// Region catalog JSON file (`LOTTERY_REGIONS_FILE`).
pub const REGIONS_FILE_VAR: &str = "LOTTERY_REGIONS_FILE";

/// Static assets directory (`LOTTERY_STATIC_DIR`).
pub const STATIC_DIR_VAR: &str = "LOTTERY_STATIC_DIR";

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub heartrails: HeartRailsConfig,
    /// Catalog to load instead of the built-in prefectures.
    pub regions_file: Option<PathBuf>,
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            heartrails: HeartRailsConfig::default(),
            regions_file: None,
            static_dir: "static".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(BIND_ADDR_VAR) {
            config.bind_addr = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr {
                    var: BIND_ADDR_VAR,
                    value,
                })?;
        }

        if let Some(url) = get(BASE_URL_VAR) {
            config.heartrails = config.heartrails.with_base_url(url);
        }

        config.regions_file = get(REGIONS_FILE_VAR).map(PathBuf::from);

        if let Some(dir) = get(STATIC_DIR_VAR) {
            config.static_dir = dir;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(
            config.heartrails.base_url,
            "https://express.heartrails.com/api/json"
        );
        assert!(config.regions_file.is_none());
        assert_eq!(config.static_dir, "static");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (BASE_URL_VAR, "http://localhost:9000/api/json"),
            (REGIONS_FILE_VAR, "/etc/lottery/regions.json"),
            (STATIC_DIR_VAR, "/srv/static"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.heartrails.base_url, "http://localhost:9000/api/json");
        assert_eq!(
            config.regions_file,
            Some(PathBuf::from("/etc/lottery/regions.json"))
        );
        assert_eq!(config.static_dir, "/srv/static");
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, " "), (REGIONS_FILE_VAR, "")]))
            .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.regions_file.is_none());
    }

    #[test]
    fn rejects_bad_address() {
        let err = AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "LOTTERY_BIND_ADDR is not a socket address: localhost"
        );
    }
}
