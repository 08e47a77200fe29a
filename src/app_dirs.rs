use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "tecla";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "tecla.log";

/// Where tecla keeps its files, resolved per platform
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// State dir where the platform has one (Linux), local data dir elsewhere
    pub fn log_path() -> Option<PathBuf> {
        Self::project().map(|dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_local_dir())
                .join(LOG_FILE)
        })
    }
}
