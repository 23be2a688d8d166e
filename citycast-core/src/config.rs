use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    advisory::{Locale, RainKeywords},
    model::Coordinate,
};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Upstream endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub units: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            units: "metric".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub locale: Locale,

    /// Replaces the locale's built-in rain keywords when set.
    pub rain_keywords: Option<RainKeywords>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_zoom: f64,
    pub fallback: Coordinate,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_zoom: 5.5,
            fallback: Coordinate::FALLBACK,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [display]
/// locale = "english"
///
/// [map]
/// default_zoom = 6.0
/// fallback = { latitude = 37.57, longitude = 126.98 }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub map: MapConfig,
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply `./.env`
    /// and finally the process environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env_key(dotenv_key(Path::new(".env")));
        cfg.apply_env_key(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    /// Load config from an explicit path, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-empty environment value takes precedence over the file.
    pub fn apply_env_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Configured keyword override, or the locale's built-in set.
    pub fn rain_keywords(&self) -> RainKeywords {
        self.display
            .rain_keywords
            .clone()
            .unwrap_or_else(|| self.display.locale.rain_keywords())
    }
}

/// API key set by a dotenv file, if the file exists and sets it.
pub fn dotenv_key(path: &Path) -> Option<String> {
    dotenvy::from_path_iter(path)
        .ok()?
        .filter_map(Result::ok)
        .find(|(key, _)| key == API_KEY_ENV)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.api.units, "metric");
        assert_eq!(cfg.display.locale, Locale::Korean);
        assert_eq!(cfg.map.default_zoom, 5.5);
        assert_eq!(cfg.map.fallback, Coordinate::new(36.5, 127.8));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.display.locale = Locale::English;
        cfg.map.default_zoom = 7.0;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[display]\nlocale = \"english\"\nrain_keywords = [\"drizzle\"]\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();

        assert_eq!(cfg.api, ApiConfig::default());
        assert_eq!(cfg.map, MapConfig::default());
        assert!(cfg.rain_keywords().matches("light drizzle"));
        assert!(!cfg.rain_keywords().matches("light rain"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn dotenv_file_supplies_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "# local secrets\nOTHER=1\nOPENWEATHER_API_KEY=\"DOTENV_KEY\"\n").unwrap();

        let mut cfg = Config::default();
        cfg.apply_env_key(dotenv_key(&path));

        assert_eq!(cfg.api_key(), Some("DOTENV_KEY"));
        assert_eq!(dotenv_key(&dir.path().join("missing.env")), None);
    }

    #[test]
    fn env_key_overrides_file_key_unless_blank() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE".into());

        cfg.apply_env_key(Some("   ".into()));
        assert_eq!(cfg.api_key(), Some("FROM_FILE"));

        cfg.apply_env_key(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));

        cfg.apply_env_key(None);
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }
}
