use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub search: SearchConfig,
    pub notifications: NotificationConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base URL of the lost-and-found API server
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiescence window before a search fires, in milliseconds
    pub debounce_ms: u64,

    /// Minimum trimmed query length that triggers a search
    pub min_query_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays up without dismissal, in
    /// milliseconds
    pub ttl_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file location; the platform data directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            search: SearchConfig::default(),
            notifications: NotificationConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_len: 2,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { ttl_ms: 5000 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { store_file: None }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("lostfound-client").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 300);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.notifications.ttl_ms, 5000);
        assert_eq!(config.http.timeout_ms, 10_000);
        assert!(config.storage.store_file.is_none());
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut config = Config::default();
        config.http.base_url = "https://lostfound.campus.edu".to_string();
        config.search.debounce_ms = 500;

        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.http.base_url, "https://lostfound.campus.edu");
        assert_eq!(parsed.search.debounce_ms, 500);
        assert_eq!(parsed.notifications.ttl_ms, 5000);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let parsed: Config = toml::from_str("[search]\ndebounce_ms = 150\n").unwrap();
        assert_eq!(parsed.search.debounce_ms, 150);
        assert_eq!(parsed.search.min_query_len, 2);
        assert_eq!(parsed.notifications.ttl_ms, 5000);
    }
}
