use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

fn default_api_url() -> String {
    "https://api.restful-api.dev/objects".to_string()
}

fn default_wrong_url() -> String {
    "https://api.restful-api.dev/objects/id".to_string()
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from("D:/EasyGoAPIAutomation/Test-Data/testData.xlsx")
}

fn default_sheet_name() -> String {
    "Add_data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_create_row() -> usize {
    3
}

fn default_update_row() -> usize {
    0
}

fn default_updated_price() -> String {
    "340".to_string()
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Collection endpoint, e.g. `https://api.restful-api.dev/objects`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Malformed prefix used by the 404 case
    #[serde(default = "default_wrong_url")]
    pub wrong_url: String,
    #[serde(default = "default_fixture_path")]
    pub fixture_path: PathBuf,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixture row submitted by the create case
    #[serde(default = "default_create_row")]
    pub create_row: usize,
    /// Fixture row the update case builds its body from
    #[serde(default = "default_update_row")]
    pub update_row: usize,
    #[serde(default = "default_updated_price")]
    pub updated_price: String,

    #[serde(default)]
    pub trust_invalid_server_cert: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            wrong_url: default_wrong_url(),
            fixture_path: default_fixture_path(),
            sheet_name: default_sheet_name(),
            log_level: default_log_level(),
            create_row: default_create_row(),
            update_row: default_update_row(),
            updated_price: default_updated_price(),
            trust_invalid_server_cert: false,
        }
    }
}

impl Config {
    // Removes the saved config from the system
    pub fn clear() -> Result<()> {
        let path = Self::config_file_path()?;
        if path.exists() {
            fs::remove_file(&path).context("Failed to delete config file")?;
            info!("Deleted config file at {:?}", path);
        } else {
            warn!("No config file found at {:?}", path);
        }
        Ok(())
    }

    /// Load the user config, falling back to defaults, then apply `OBJECTS_*`
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let (config, source) = Self::load_with_source()?;
        if source == ConfigSource::Defaults {
            warn!("Config file not found, using defaults");
        }
        Ok(config)
    }

    /// Like [`Config::load`] but silent, reporting where the values came from
    /// so the caller can log it once logging is set up.
    pub fn load_with_source() -> Result<(Self, ConfigSource)> {
        let (mut config, source) = Self::load_at(&Self::config_file_path()?)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok((config, source))
    }

    /// Load `path` if it exists, defaults otherwise. No env overrides.
    pub fn load_at(path: &Path) -> Result<(Self, ConfigSource)> {
        if path.exists() {
            Ok((Self::load_from(path)?, ConfigSource::File(path.to_path_buf())))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_dir = path.parent().context("Failed to get config directory")?;
        fs::create_dir_all(config_dir).context("Failed to create config directory")?;

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        info!("Config saved to: {:?}", path);
        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("objects").join("config.json"))
    }

    /// Overlay values from the environment. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OBJECTS_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("OBJECTS_WRONG_URL") {
            self.wrong_url = v;
        }
        if let Some(v) = lookup("OBJECTS_FIXTURE_PATH") {
            self.fixture_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("OBJECTS_SHEET_NAME") {
            self.sheet_name = v;
        }
        if let Some(v) = lookup("OBJECTS_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("OBJECTS_TRUST_INVALID_SERVER_CERT") {
            self.trust_invalid_server_cert = matches!(v.as_str(), "1" | "true" | "yes");
        }
    }

    /// `{wrong_url}/{id}`
    pub fn wrong_object_url(&self, id: &str) -> String {
        format!("{}/{}", self.wrong_url.trim_end_matches('/'), id)
    }
}
