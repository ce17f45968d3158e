use std::env;
use std::path::PathBuf;

use crate::chart::DEFAULT_TYPE_CHART_PATH;

pub const BIND_ENV: &str = "MANYTYPES_BIND";
pub const CHART_ENV: &str = "MANYTYPES_CHART";
pub const STATIC_DIR_ENV: &str = "MANYTYPES_STATIC_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub chart_path: PathBuf,
    /// Pre-built front-end served for every non-API path.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            chart_path: PathBuf::from(DEFAULT_TYPE_CHART_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve settings through `lookup`, falling back to defaults for unset or blank keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            bind_addr: read(BIND_ENV).unwrap_or(defaults.bind_addr),
            chart_path: read(CHART_ENV).map(PathBuf::from).unwrap_or(defaults.chart_path),
            static_dir: read(STATIC_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    pub fn with_overrides(mut self, bind: Option<String>, chart: Option<PathBuf>) -> Self {
        if let Some(bind) = bind {
            self.bind_addr = bind;
        }
        if let Some(chart) = chart {
            self.chart_path = chart;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_and_blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(|key| match key {
            BIND_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn env_values_then_flags() {
        let config = ServerConfig::from_lookup(|key| match key {
            BIND_ENV => Some("0.0.0.0:8080".to_string()),
            CHART_ENV => Some("out/chart.json".to_string()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.chart_path, PathBuf::from("out/chart.json"));

        let config = config.with_overrides(Some("127.0.0.1:9000".to_string()), None);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.chart_path, PathBuf::from("out/chart.json"));
    }
}
