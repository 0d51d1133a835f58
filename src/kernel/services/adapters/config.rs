//! 配置服务：管理编辑器配置
//!
//! 内存中持有 `Settings`，并负责 settings.json 的读写

use crate::kernel::services::ports::config::{LogConfig, SearchSettings, Settings};
use std::fmt;
use std::io;
use std::path::Path;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

pub fn load_settings(path: &Path) -> Result<Settings> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// 配置文件不存在时写入默认配置
pub fn ensure_settings_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    save_settings(path, &Settings::default())
}

pub struct ConfigService {
    settings: Settings,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// 读取失败时回退到默认配置
    pub fn load_or_default(path: &Path) -> Self {
        match load_settings(path) {
            Ok(settings) => Self::with_settings(settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "load settings failed, using defaults");
                Self::new()
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn search(&self) -> SearchSettings {
        self.settings.search
    }

    pub fn log(&self) -> &LogConfig {
        &self.settings.log
    }

    pub fn checkpoint_interval(&self) -> usize {
        self.settings.history.checkpoint_interval
    }

    pub fn set_case_sensitive(&mut self, value: bool) {
        self.settings.search.case_sensitive = value;
    }

    pub fn set_use_regex(&mut self, value: bool) {
        self.settings.search.use_regex = value;
    }

    pub fn set_checkpoint_interval(&mut self, interval: usize) {
        self.settings.history.checkpoint_interval = interval.max(1);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_settings(path, &self.settings)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
