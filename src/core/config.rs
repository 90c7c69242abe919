//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the notebook directory
pub const NOTEBOOK_DIR_ENV: &str = "MARKUPBOOK_DIR";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding notebook.md
    pub notebook_dir: PathBuf,
    /// Snapshot into git after every successful edit
    pub auto_commit: bool,
    /// Identity recorded on snapshot commits
    pub commit_author: CommitAuthor,
    /// Branch HEAD points at in a freshly initialized repository
    pub default_branch: String,
}

/// Name and email used for snapshot commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notebook_dir: PathBuf::from("markups"),
            auto_commit: false,
            commit_author: CommitAuthor::default(),
            default_branch: "main".to_string(),
        }
    }
}

impl Default for CommitAuthor {
    fn default() -> Self {
        Self {
            name: "Markupbook".to_string(),
            email: "markupbook@local".to_string(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "markupbook", "Markupbook")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the platform config directory
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Apply environment overrides
    pub fn with_env(mut self) -> Self {
        if let Some(dir) = std::env::var_os(NOTEBOOK_DIR_ENV) {
            if !dir.is_empty() {
                self.notebook_dir = PathBuf::from(dir);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.commit_author.email, "markupbook@local");
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf").join("config.json");
        let config = AppConfig {
            notebook_dir: PathBuf::from("/srv/notes"),
            auto_commit: true,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"auto_commit": true, "commit_author": {"name": "Ann"}}"#)
            .unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.auto_commit);
        assert_eq!(config.notebook_dir, PathBuf::from("markups"));
        assert_eq!(config.commit_author.name, "Ann");
        assert_eq!(config.commit_author.email, "markupbook@local");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
