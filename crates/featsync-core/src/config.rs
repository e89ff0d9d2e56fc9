use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::block::DEFAULT_OPEN_ITEM_LIMIT;
use crate::infer::default_keywords;

pub const DEFAULT_NOTES_DIR: &str = "notes";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatsyncConfig {
    pub notes_dir: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub max_open_items: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub notes_dir: String,
    pub keywords: Vec<String>,
    pub max_open_items: usize,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            notes_dir: DEFAULT_NOTES_DIR.to_string(),
            keywords: default_keywords(),
            max_open_items: DEFAULT_OPEN_ITEM_LIMIT,
        }
    }
}

impl SyncSettings {
    pub fn from_config(config: Option<&FeatsyncConfig>) -> Self {
        let mut settings = Self::default();
        let Some(config) = config else {
            return settings;
        };
        if let Some(dir) = config
            .notes_dir
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            settings.notes_dir = dir.to_string();
        }
        if let Some(keywords) = config.keywords.as_ref() {
            let keywords: Vec<String> = keywords
                .iter()
                .map(|keyword| keyword.trim().to_string())
                .filter(|keyword| !keyword.is_empty())
                .collect();
            if !keywords.is_empty() {
                settings.keywords = keywords;
            }
        }
        if let Some(limit) = config.max_open_items {
            settings.max_open_items = limit;
        }
        settings
    }

    pub fn notes_path(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.notes_dir)
    }
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".featsync.toml", ".featsyncrc"]
}

pub fn read_config(path: &Path) -> Result<FeatsyncConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str::<FeatsyncConfig>(&text)?)
}

/// First readable config file under `repo_root`. Broken files are skipped.
pub fn load_config(repo_root: &Path) -> Option<FeatsyncConfig> {
    for name in config_filename_candidates() {
        let path = repo_root.join(name);
        if !path.is_file() {
            continue;
        }
        match read_config(&path) {
            Ok(config) => return Some(config),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "ignoring config file");
            }
        }
    }
    None
}

pub fn load_settings(repo_root: &Path) -> SyncSettings {
    SyncSettings::from_config(load_config(repo_root).as_ref())
}
