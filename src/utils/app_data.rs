use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "wordtrack";
const CONFIG_FILE: &str = "config.json";

/// Snapshot file used when nothing else is configured
pub const DEFAULT_REPOSITORY_FILE: &str = "repository.ser";

/// Tracker configuration, read from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Where the index snapshot is loaded from and saved to
    #[serde(default = "default_repository_path")]
    pub repository_path: PathBuf,

    /// Persist the index at the end of a run
    #[serde(default = "default_save_repository")]
    pub save_repository: bool,
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPOSITORY_FILE)
}

fn default_save_repository() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            repository_path: default_repository_path(),
            save_repository: default_save_repository(),
        }
    }
}

impl TrackerConfig {
    /// Load config from the app config directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: TrackerConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config as pretty-printed JSON
    #[cfg(test)]
    pub(crate) fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Get the path to the per-user config file, if the platform has a config dir
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}
