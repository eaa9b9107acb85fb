use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};
use crate::scoring::Benchmarks;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
    Testing,
}

impl FromStr for RunMode {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(RunMode::Development),
            "production" | "prod" => Ok(RunMode::Production),
            "testing" | "test" => Ok(RunMode::Testing),
            _ => Err(AnalyticsError::InvalidRunMode(value.to_string())),
        }
    }
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
            RunMode::Testing => "testing",
        }
    }

    pub fn default_log_level(self) -> &'static str {
        match self {
            RunMode::Development => "debug",
            RunMode::Production => "warn",
            RunMode::Testing => "info",
        }
    }

    pub fn debug(self) -> bool {
        !matches!(self, RunMode::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            web_root: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output. `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub views_min: u64,
    pub views_max: u64,
    pub trend_base_views: f64,
    pub trend_growth_rate: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            views_min: 50_000,
            views_max: 250_000,
            trend_base_views: 1_000.0,
            trend_growth_rate: 1.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub default_trend_days: i64,
    pub max_trend_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_trend_days: 7,
            max_trend_days: 90,
        }
    }
}

/// Credentials for the external data source. Not read by any computation yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub api_key: Option<String>,
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: RunMode,
    pub debug: Option<bool>,
    pub log_level: Option<String>,
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub benchmarks: Benchmarks,
    pub analytics: AnalyticsConfig,
    pub youtube: YoutubeConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => AppConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(AnalyticsError::ConfigRead)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.unwrap_or_else(|| self.mode.debug())
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| self.mode.default_log_level())
    }

    /// Clamps a requested trend length to the configured ceiling.
    pub fn trend_days(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.analytics.default_trend_days)
            .min(self.analytics.max_trend_days)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(mode) = lookup("APP_ENV") {
            if let Ok(value) = mode.parse::<RunMode>() {
                self.mode = value;
            }
        }
        if let Some(debug) = lookup("ANALYTICS_DEBUG") {
            self.debug = Some(debug.trim().eq_ignore_ascii_case("true"));
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = Some(level.trim().to_lowercase());
        }
        if let Some(host) = lookup("ANALYTICS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ANALYTICS_PORT") {
            if let Ok(value) = port.trim().parse::<u16>() {
                self.server.port = value;
            }
        }
        if let Some(web_root) = lookup("ANALYTICS_WEB_ROOT") {
            self.server.web_root = Some(web_root);
        }
        if let Some(seed) = lookup("ANALYTICS_SEED") {
            if let Ok(value) = seed.trim().parse::<u64>() {
                self.generator.seed = Some(value);
            }
        }
        if let Some(key) = lookup("YOUTUBE_API_KEY") {
            self.youtube.api_key = Some(key);
        }
        if let Some(channel) = lookup("YOUTUBE_CHANNEL_ID") {
            self.youtube.channel_id = Some(channel);
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYTICS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analytics.toml")))
}
