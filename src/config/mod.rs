use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the directory holding config.toml and session.json
pub const HOME_ENV: &str = "SPORTS_CONSOLE_HOME";
/// Overrides `api.base_url`
pub const API_URL_ENV: &str = "SPORTS_CONSOLE_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Where uploaded photos are served from
    #[serde(default = "default_storage_url")]
    pub storage_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Start views in mock mode instead of calling the backend
    #[serde(default)]
    pub use_mock: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_storage_url() -> String {
    "http://localhost:8000/storage".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_url: default_storage_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.sports-console/)
    pub fn home_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var(HOME_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".sports-console"))
    }

    /// Get config file path (~/.sports-console/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load configuration from a file, using defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            tracing::debug!("Config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.storage_url, "http://localhost:8000/storage");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(!config.data.use_mock);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(config.api.base_url, deserialized.api.base_url);
        assert_eq!(config.data.use_mock, deserialized.data.use_mock);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[data]\nuse_mock = true\n").unwrap();
        assert!(config.data.use_mock);
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    #[serial]
    fn test_save_and_load_round_trip() -> Result<()> {
        env::remove_var(API_URL_ENV);
        let dir = tempdir()?;
        let path = dir.path().join("conf").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://example.test/api".to_string();
        config.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.api.base_url, "http://example.test/api");

        Ok(())
    }

    #[test]
    #[serial]
    fn test_default_location_follows_home_env() -> Result<()> {
        env::remove_var(API_URL_ENV);
        let dir = tempdir()?;
        env::set_var(HOME_ENV, dir.path());

        let missing = Config::load();
        let mut config = Config::default();
        config.api.storage_url = "http://cdn.test/storage".to_string();
        let saved = config.save();
        let loaded = Config::load();
        env::remove_var(HOME_ENV);

        assert_eq!(missing?.api.storage_url, Config::default().api.storage_url);
        saved?;
        assert!(dir.path().join("config.toml").exists());
        assert_eq!(loaded?.api.storage_url, "http://cdn.test/storage");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_env_overrides_base_url() -> Result<()> {
        let dir = tempdir()?;
        env::set_var(API_URL_ENV, "http://override.test/api");

        let loaded = Config::load_from(&dir.path().join("missing.toml"));
        env::remove_var(API_URL_ENV);

        assert_eq!(loaded?.api.base_url, "http://override.test/api");
        Ok(())
    }
}
