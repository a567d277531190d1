use crate::domain::config::{ConfigOverlay, HotloadConfig};
use crate::domain::error::{HotloadError, HotloadResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> HotloadResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Create a manager over explicit file locations
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files
    pub fn load_config(&self) -> HotloadResult<HotloadConfig> {
        let mut config = HotloadConfig::default();

        if self.global_config_path.exists() {
            config.merge(self.load_overlay(&self.global_config_path)?);
        }

        // Project settings win over global ones key by key
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                config.merge(self.load_overlay(project_path)?);
            }
        }

        Ok(config)
    }

    /// Load a full configuration from a specific path
    pub fn load_config_from_path(&self, path: &Path) -> HotloadResult<HotloadConfig> {
        let mut config = HotloadConfig::default();
        config.merge(self.load_overlay(path)?);
        Ok(config)
    }

    fn load_overlay(&self, path: &Path) -> HotloadResult<ConfigOverlay> {
        let content = fs::read_to_string(path).map_err(|e| HotloadError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| HotloadError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Get global configuration path
    fn get_global_config_path() -> HotloadResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| HotloadError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("hotload").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".hotload").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }
}
