//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = ".taskdeck-data";
const DEFAULT_PORT: u16 = 8081;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Read `TASKDECK_*` variables, falling back to defaults for anything
    /// unset or unparseable.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: lookup("TASKDECK_DATA_DIR")
                .filter(|raw| !raw.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            host: parse_or(lookup("TASKDECK_HOST"), defaults.host),
            port: parse_or(lookup("TASKDECK_PORT"), defaults.port),
            cors: flag_or(lookup("TASKDECK_CORS"), defaults.cors),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(default)
}

fn flag_or(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_bind_loopback() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "127.0.0.1:8081".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("TASKDECK_DATA_DIR", "/tmp/tasks"),
            ("TASKDECK_HOST", "0.0.0.0"),
            ("TASKDECK_PORT", "9000"),
            ("TASKDECK_CORS", "off"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tasks"));
        assert_eq!(config.addr(), "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert!(!config.cors);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[("TASKDECK_PORT", "http"), ("TASKDECK_CORS", "maybe")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.cors);
    }
}
