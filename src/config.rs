use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, StoreError};

pub const DEFAULT_DB_FILE: &str = "NotesDB.sqlite3";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file. `None` (`db_path: ~` in YAML) keeps notes in memory.
    #[serde(default = "default_db_path")]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self {
            db_path: None,
            ..Self::default()
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| StoreError::Config(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&contents)
    }
}

fn default_db_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_DB_FILE))
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn load_from_env() -> StoreConfig {
    let mut config = StoreConfig::default();

    if let Some(path) = env::var_os("NOTES_DB_PATH") {
        config.db_path = Some(PathBuf::from(path));
    }

    if let Ok(level) = env::var("NOTES_LOG_LEVEL") {
        config.log_level = level;
    }

    config
}

pub fn load_config() -> Result<StoreConfig> {
    // Retrieve env variable
    let config_path = env::var("NOTES_STORE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return StoreConfig::from_file(Path::new(&config_path));
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return StoreConfig::from_file(Path::new("config.yaml"));
    }

    // Fallback to environment variables
    tracing::info!("No config file found, loading configuration from environment variables");
    Ok(load_from_env())
}
