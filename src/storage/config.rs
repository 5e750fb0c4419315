//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unit system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Imperial units (lbs, miles) — default, matches the tracking form
    #[default]
    Imperial,
    /// Metric units (kg, km)
    Metric,
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Units::Imperial => write!(f, "Imperial"),
            Units::Metric => write!(f, "Metric"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Profile settings
    pub profile: ProfileSettings,
    /// Daily goal settings
    pub goals: GoalSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            profile: ProfileSettings::default(),
            goals: GoalSettings::default(),
        }
    }
}

/// Profile-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Display name shown on the leaderboard
    pub display_name: String,
    /// Unit preference
    pub units: Units,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            display_name: "Player".to_string(),
            units: Units::Imperial,
        }
    }
}

/// Daily goal settings used by the tracking screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSettings {
    /// Daily step goal
    pub step_goal: u32,
    /// Daily water goal in glasses
    pub water_goal_glasses: u8,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self {
            step_goal: 10_000,
            water_goal_glasses: 8,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fitquest", "FitQuest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Get the database file path.
pub fn get_database_path() -> PathBuf {
    get_data_dir().join("fitquest.db")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
