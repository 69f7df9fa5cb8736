use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "timedquiz")
    }

    pub fn history_path() -> PathBuf {
        Self::project()
            .map(|p| p.data_local_dir().join("attempts.yaml"))
            .unwrap_or_else(|| PathBuf::from("timedquiz_attempts.yaml"))
    }

    pub fn log_dir() -> PathBuf {
        Self::project()
            .map(|p| p.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|p| p.config_dir().join("config.yaml"))
            .unwrap_or_else(|| PathBuf::from("timedquiz_config.yaml"))
    }
}
