// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{
    backend::MAX_WINDOW_DAYS,
    error::{Result, TrackerError},
    provider::{commands, CommandArgs, FetchRequest},
};

pub const CONFIG_ENV: &str = "TRACKER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./tracker.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl ChartKind {
    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Bar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub gridlines: bool,
    /// Lowest the top of the value axis may be; taller data raises it.
    pub y_max: Option<f64>,
    /// Anything ratatui's `Color` parses: a name or `#rrggbb`.
    pub color: String,
    pub title: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            gridlines: true,
            y_max: Some(15.0),
            color: "#8a70e7".to_string(),
            title: "past 30 days".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub enabled: bool,
    pub sound_path: String,
    pub volume: f32,
    /// Also raise a desktop notification when a block finishes.
    pub notify: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_path: "gong.mp3".to_string(),
            volume: 0.8,
            notify: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub command: String,
    pub args: Option<CommandArgs>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            command: commands::GET_PREVIOUS.to_string(),
            args: None,
        }
    }
}

impl FetchConfig {
    pub fn request(&self) -> FetchRequest {
        let request = FetchRequest::new(&self.command);
        match &self.args {
            Some(args) => request.with_args(args.clone()),
            None => request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
    pub block_minutes: u64,
    pub window_days: usize,
    pub chart: ChartConfig,
    pub alert: AlertConfig,
    pub fetch: FetchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./db/tracker.db"),
            log_dir: PathBuf::from("./logs"),
            block_minutes: 25,
            window_days: 30,
            chart: ChartConfig::default(),
            alert: AlertConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the YAML config at `path`; a missing file means all defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(TrackerError::InvalidConfig(format!(
                "window_days must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if self.block_minutes == 0 || self.block_minutes.checked_mul(60).is_none() {
            return Err(TrackerError::InvalidConfig(format!(
                "block_minutes out of range: {}",
                self.block_minutes
            )));
        }
        Ok(())
    }

    /// `$TRACKER_CONFIG`, or `./tracker.yml`.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn block_duration(&self) -> Duration {
        Duration::from_secs(self.block_minutes.saturating_mul(60))
    }
}
