use crate::operation::{Endianness, OperandWidth};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub default_width: OperandWidth,
    #[serde(default)]
    pub default_signed: bool,
    #[serde(default)]
    pub endianness: Endianness,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "Warn".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_width: OperandWidth::Byte,
            default_signed: false,
            endianness: Endianness::Little,
            log_level: default_log_level(),
        }
    }
}

impl SystemConfig {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "hexops").map(|dirs| dirs.config_dir().join("config.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists()
            && let Ok(data) = std::fs::read_to_string(config_path)
            && let Ok(config) = serde_json::from_str(&data)
        {
            return config;
        }
        Self::default()
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(config_path) = Self::config_path() {
            self.save_to(&config_path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(config_dir) = config_path.parent() {
            std::fs::create_dir_all(config_dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, data)?;
        Ok(())
    }

    /// Level for the terminal logger; unknown names fall back to `Warn`.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}
