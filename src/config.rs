use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::info;

use crate::api::DEFAULT_API_BASE;
use crate::cli::Cli;
use crate::controller::Settings;

pub const API_BASE_ENV: &str = "TWOCHOICE_API_BASE";

/// Keys accepted in `config.yaml`. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_base: Option<String>,
    pub user_name: Option<String>,
    pub reveal_delay_ms: Option<u64>,
    pub bar_max_width: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub settings: Settings,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "twochoice")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.yaml"))
}

pub fn default_log_path() -> PathBuf {
    project_dirs()
        .map(|d| d.data_dir().join("twochoice.log"))
        .unwrap_or_else(|| std::env::temp_dir().join("twochoice.log"))
}

/// Reads a config file. A missing file is only an error when it was asked
/// for explicitly.
pub fn read_file_config(path: &Path, explicit: bool) -> Result<FileConfig, String> {
    if !path.exists() {
        if explicit {
            return Err(format!("Config file not found: {}", path.display()));
        }
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self, String> {
        let file = match &cli.config {
            Some(path) => read_file_config(Path::new(path), true)?,
            None => match default_config_path() {
                Some(path) => read_file_config(&path, false)?,
                None => FileConfig::default(),
            },
        };
        let env_base = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty());
        Ok(Self::resolve(cli, file, env_base))
    }

    /// Layers defaults < file < environment < command line.
    pub fn resolve(cli: &Cli, file: FileConfig, env_base: Option<String>) -> Self {
        let api_base = cli
            .api_base
            .clone()
            .or(env_base)
            .or(file.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let mut settings = Settings::default();
        if let Some(ms) = file.reveal_delay_ms {
            settings.reveal_delay = Duration::from_millis(ms);
        }
        if let Some(width) = file.bar_max_width.filter(|w| *w > 0.0) {
            settings.bar_max_width = width;
        }
        settings.user_name = cli
            .user_name
            .clone()
            .or(file.user_name)
            .filter(|s| !s.trim().is_empty());

        let log_file = cli
            .log_file
            .as_ref()
            .map(PathBuf::from)
            .or(file.log_file)
            .unwrap_or_else(default_log_path);

        let config = Self {
            api_base,
            timeout: file.timeout_secs.map(Duration::from_secs),
            log_file,
            settings,
        };
        info!(api_base = %config.api_base, "config resolved");
        config
    }
}
