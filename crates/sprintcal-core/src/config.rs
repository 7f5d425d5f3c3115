use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_SPRINT_DAYS: u32 = 14;
const DATA_FILE_NAME: &str = "sprints.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    #[serde(default)]
    pub default_sprint_days: Option<u32>,
    #[serde(default)]
    pub week_start: Option<WeekStart>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/sprintcal/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("sprintcal/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("sprintcal\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = Self::from_toml(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn effective_data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("sprintcal").join(DATA_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
        })
    }

    pub fn effective_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Length used when a new sprint is created without an end date.
    /// A configured zero falls back to the default.
    pub fn effective_sprint_days(&self) -> u32 {
        self.default_sprint_days
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_SPRINT_DAYS)
    }

    pub fn effective_week_start(&self) -> WeekStart {
        self.week_start.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_sprint_days(), 14);
        assert_eq!(config.effective_week_start(), WeekStart::Monday);
        assert!(config.effective_data_file().ends_with(DATA_FILE_NAME));
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            data_file = "/tmp/plan.json"
            default_sprint_days = 10
            week_start = "sunday"
            "#,
        )
        .unwrap();

        assert_eq!(config.effective_data_file(), PathBuf::from("/tmp/plan.json"));
        assert_eq!(config.effective_sprint_days(), 10);
        assert_eq!(config.effective_week_start().weekday(), Weekday::Sun);
    }

    #[test]
    fn test_zero_sprint_days_falls_back() {
        let config = AppConfig {
            default_sprint_days: Some(0),
            ..AppConfig::default()
        };
        assert_eq!(config.effective_sprint_days(), 14);
    }

    #[test]
    fn test_unknown_week_start_is_rejected() {
        assert!(AppConfig::from_toml(r#"week_start = "friday""#).is_err());
    }
}
