use crate::render::DayWindow;
use crate::storage::atomic_write;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL serving `/events.json`, or the full URL of the document.
    pub url: String,
    pub allow_insecure_certs: bool,
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_minutes: u32,
    pub margin_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        let window = DayWindow::default();
        Self {
            url: "http://localhost:3000".to_string(),
            allow_insecure_certs: false,
            start_hour: window.start_hour,
            end_hour: window.end_hour,
            slot_minutes: window.slot_minutes,
            margin_percent: window.margin_percent,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(dir) = env::var("DAYCAL_CONFIG_DIR") {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("com", "daycal", "daycal").map(|proj| proj.config_dir().to_path_buf())
    }

    pub fn get_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::get_path().context("No config directory available")?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_path().context("No config directory available")?;
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        atomic_write(path, toml_str)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_hour <= self.start_hour || self.end_hour > 23 {
            anyhow::bail!(
                "Invalid day window {}:00-{}:00",
                self.start_hour,
                self.end_hour
            );
        }
        if self.slot_minutes == 0 || self.slot_minutes > 60 {
            anyhow::bail!("slot_minutes must be between 1 and 60");
        }
        if !(0.0..50.0).contains(&self.margin_percent) {
            anyhow::bail!("margin_percent must be between 0 and 50");
        }
        Ok(())
    }

    pub fn window(&self) -> DayWindow {
        DayWindow {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            slot_minutes: self.slot_minutes,
            margin_percent: self.margin_percent,
        }
    }
}
