use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::services::appreciation_service::DEFAULT_STORAGE_KEY;
use crate::utils::logger::DEFAULT_LOG_DIRECTIVES;

pub const CONFIG_ENV: &str = "FIRSTLEAF_CONFIG";
pub const DATA_FILE_ENV: &str = "FIRSTLEAF_DATA_FILE";
const CONFIG_FILE_NAME: &str = "firstleaf.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WallConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_database_file")]
    pub database_file: String,
    #[serde(default = "default_log_directives")]
    pub log_directives: String,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            storage_key: default_storage_key(),
            database_file: default_database_file(),
            log_directives: default_log_directives(),
        }
    }
}

impl WallConfig {
    /// Loads `$FIRSTLEAF_CONFIG`, or `firstleaf.yaml` under `base_dir`, then
    /// applies `$FIRSTLEAF_DATA_FILE`.
    pub fn load(base_dir: &Path) -> AppResult<Self> {
        let config_path = resolve_config_path(base_dir);
        let mut config = Self::from_path(&config_path)?;

        if let Ok(data_file) = env::var(DATA_FILE_ENV) {
            debug!(target: "app::config", %data_file, "data file overridden from environment");
            config.data_file = PathBuf::from(data_file);
        }

        Ok(config)
    }

    /// Missing file means defaults. A relative `data_file` is taken relative to
    /// the config file's directory.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(target: "app::config", path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|err| {
            AppError::validation_with_source(format!("failed to read {}", path.display()), err)
        })?;
        let mut config = parse_yaml(&raw, &format!("invalid config file {}", path.display()))?;

        if config.data_file.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_file = parent.join(&config.data_file);
            }
        }

        info!(target: "app::config", path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> AppResult<Self> {
        parse_yaml(raw, "invalid config yaml")
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }
}

fn parse_yaml(raw: &str, context: &str) -> AppResult<WallConfig> {
    if raw.trim().is_empty() {
        return Ok(WallConfig::default());
    }
    serde_yaml::from_str(raw).map_err(|err| AppError::validation_with_source(context, err))
}

fn resolve_config_path(base_dir: &Path) -> PathBuf {
    match env::var(CONFIG_ENV) {
        Ok(path) => PathBuf::from(path),
        Err(_) => base_dir.join(CONFIG_FILE_NAME),
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/contributors.ndjson")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_database_file() -> String {
    "firstleaf.sqlite".to_string()
}

fn default_log_directives() -> String {
    DEFAULT_LOG_DIRECTIVES.to_string()
}
