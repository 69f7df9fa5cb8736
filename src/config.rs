use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::cli::Cli;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Question bank file or directory. The built-in bank is used when unset.
    pub quiz: Option<PathBuf>,
    pub history_file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `timedquiz=debug`.
    pub log_filter: Option<String>,
}

impl Config {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub quiz: Option<PathBuf>,
    pub history_file: PathBuf,
    pub log_filter: String,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let log_filter = match cli.verbose {
            0 => config.log_filter.unwrap_or_else(|| "warn".to_string()),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };

        Self {
            quiz: cli.quiz.clone().or(config.quiz),
            history_file: cli
                .history_file
                .clone()
                .or(config.history_file)
                .unwrap_or_else(AppDirs::history_path),
            log_filter,
        }
    }
}

pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(AppDirs::config_path)
}
