//! Configuration management for the admin client.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default backend base URL (can be overridden at compile time via
/// `ZTLOG_DEFAULT_API_BASE_URL`).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("ZTLOG_DEFAULT_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8080/admin/api",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Page size the backend uses for list endpoints. Only used to derive a page
/// count when a page envelope omits `totalPages`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const ENV_API_BASE_URL: &str = "ZTLOG_API_BASE_URL";
const ENV_LOG_LEVEL: &str = "ZTLOG_LOG_LEVEL";
const ENV_PAGE_SIZE: &str = "ZTLOG_PAGE_SIZE";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Backend REST API base URL, e.g. `https://blog.example.com/admin/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Backend list page size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (if present), then apply
    /// environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Empty values are ignored; an unparsable page size is
    /// logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = non_empty(ENV_API_BASE_URL) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(size) = non_empty(ENV_PAGE_SIZE) {
            match size.trim().parse::<u32>() {
                Ok(size) if size > 0 => self.page_size = size,
                _ => tracing::warn!(value = %size, "Ignoring invalid {}", ENV_PAGE_SIZE),
            }
        }
    }

    /// Reject configurations the client cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        self.api_base_url()?;
        if self.page_size == 0 {
            return Err(CoreError::Config("page_size must be positive".to_string()));
        }
        Ok(())
    }

    /// Get the API base URL as a parsed URL.
    pub fn api_base_url(&self) -> CoreResult<Url> {
        Url::parse(&self.api_base_url).map_err(CoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_config_load_from_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "log_level": "debug" }"#).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_config_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config {
            log_level: "trace".to_string(),
            api_base_url: "https://blog.example.com/admin/api".to_string(),
            page_size: 20,
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("ZTLOG_API_BASE_URL", " https://api.example.com "),
            ("ZTLOG_LOG_LEVEL", "debug"),
            ("ZTLOG_PAGE_SIZE", "25"),
        ]));

        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_overrides_ignore_empty_and_invalid_values() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("ZTLOG_API_BASE_URL", "  "),
            ("ZTLOG_PAGE_SIZE", "zero"),
        ]));
        assert_eq!(config, Config::default());

        config.apply_overrides(env(&[("ZTLOG_PAGE_SIZE", "0")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_config_invalid_url() {
        let config = Config {
            api_base_url: "not a valid url".to_string(),
            ..Config::default()
        };

        assert!(config.api_base_url().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_url_parses() {
        let url = Config::default().api_base_url().unwrap();
        assert!(url.scheme().starts_with("http"));
    }
}
