//! User settings - persisted preferences.
//!
//! Settings are read from a TOML file at startup and never written back. A missing or unreadable
//! file silently yields the defaults.

use std::path::{Path, PathBuf};

use gmao_store::views::{UPCOMING_DAYS, UPCOMING_LIMIT, UpcomingWindow};
use serde::Deserialize;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "GMAO_DATA_DIR";

/// Application settings.
///
/// Read from TOML in the user's config directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the data document lives.
    pub storage: StorageSettings,

    /// Dashboard figures.
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data directory; the platform data directory when unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Parts at or below this quantity raise a stock alert.
    pub stock_threshold: f64,
    /// Days ahead shown in the upcoming-interventions list.
    pub upcoming_days: u64,
    /// Maximum entries in the upcoming-interventions list.
    pub upcoming_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            stock_threshold: 2.0,
            upcoming_days: UPCOMING_DAYS,
            upcoming_limit: UPCOMING_LIMIT,
        }
    }
}

impl DashboardSettings {
    pub fn upcoming_window(&self) -> UpcomingWindow {
        UpcomingWindow {
            days: self.upcoming_days,
            limit: self.upcoming_limit,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::config_path()
                .map(|path| Self::load_from(&path))
                .unwrap_or_default(),
        }
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let settings = std::fs::read_to_string(path)
            .ok()
            .and_then(|content| match toml::from_str(&content) {
                Ok(settings) => Some(settings),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "ignoring unreadable settings");
                    None
                }
            })
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        settings
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Resolve the data directory.
    ///
    /// Precedence: command-line flag, then environment, then settings file,
    /// then the platform data directory, then `./gmao-data`.
    pub fn resolve_data_dir(&self, flag: Option<&Path>, env: Option<PathBuf>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        if let Some(dir) = env.filter(|dir| !dir.as_os_str().is_empty()) {
            return dir;
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("gmao-data"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "Gmao", "gmao")
}
