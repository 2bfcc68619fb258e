use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timers::TimerSettings;
use crate::week::geometry::{DEFAULT_AUTO_SCROLL_OFFSET, DEFAULT_HOUR_HEIGHT, DEFAULT_TIME_COLUMN_WIDTH};
use crate::week::navigator::weekday_from_index;
use crate::week::{GridMetrics, LayoutMode, Preset};

pub const APP_DIR: &str = "weekgrid";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("week_starts_on must be 0 (Sunday) through 6 (Saturday), got {0}")]
    InvalidWeekStart(u8),
    #[error("min_cell_height must be positive, got {0}")]
    InvalidCellHeight(f64),
    #[error("time_column_width must be within 0..100, got {0}")]
    InvalidTimeColumnWidth(f64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub view: ViewConfig,
    pub timers: TimerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewConfig {
    pub week_starts_on: u8,
    pub min_cell_height: f64,
    pub time_column_width: f64,
    pub layout: LayoutMode,
    pub default_preset: Preset,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimerConfig {
    pub clock_tick_secs: u64,
    pub auto_scroll_delay_ms: u64,
    pub auto_scroll_offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub rows_per_hour: u16,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.week_start()?;
        if self.view.min_cell_height.is_nan() || self.view.min_cell_height <= 0.0 {
            return Err(ConfigError::InvalidCellHeight(self.view.min_cell_height));
        }
        if !(0.0..100.0).contains(&self.view.time_column_width) {
            return Err(ConfigError::InvalidTimeColumnWidth(self.view.time_column_width));
        }
        Ok(())
    }

    pub fn week_start(&self) -> Result<Weekday, ConfigError> {
        weekday_from_index(self.view.week_starts_on)
            .ok_or(ConfigError::InvalidWeekStart(self.view.week_starts_on))
    }

    pub fn grid_metrics(&self) -> GridMetrics {
        GridMetrics {
            hour_height: self.view.min_cell_height,
            time_column_width: self.view.time_column_width,
            layout: self.view.layout,
        }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_interval: Duration::from_secs(self.timers.clock_tick_secs),
            auto_scroll_delay: Duration::from_millis(self.timers.auto_scroll_delay_ms),
            auto_scroll_offset: self.timers.auto_scroll_offset,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: ViewConfig {
                week_starts_on: 1,
                min_cell_height: DEFAULT_HOUR_HEIGHT,
                time_column_width: DEFAULT_TIME_COLUMN_WIDTH,
                layout: LayoutMode::Desktop,
                default_preset: Preset::Full,
            },
            timers: TimerConfig {
                clock_tick_secs: 60,
                auto_scroll_delay_ms: 300,
                auto_scroll_offset: DEFAULT_AUTO_SCROLL_OFFSET,
            },
            ui: UiConfig {
                theme: "default".to_string(),
                rows_per_hour: 2,
            },
        }
    }
}
