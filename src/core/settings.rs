//! Settings management
//!
//! Reads optional settings from `config.toml` in the config directory and
//! layers environment variable overrides on top. Precedence is
//! environment > file > built-in default.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{defaults, urls};
use crate::error::SettingsError;
use crate::infra::dirs::ToolsDirs;

/// Reuse a previously downloaded archive instead of fetching it again
pub const ENV_ZIP_CACHE: &str = "ADB_ZIP_CACHE";

/// Override the archive download URL
pub const ENV_URL: &str = "PLATFORM_TOOLS_URL";

/// Settings for android-platform-tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Download settings
    #[serde(default)]
    pub download: DownloadSettings,

    /// Path settings
    #[serde(default)]
    pub paths: PathSettings,
}

/// Download settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DownloadSettings {
    /// Archive URL replacing the vendor default
    pub url: Option<String>,

    /// Attempts per download
    pub attempts: Option<u32>,

    /// Expected SHA-256 of the archive
    pub sha256: Option<String>,

    /// Reuse an already downloaded archive
    pub reuse_archive: Option<bool>,
}

/// Path settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathSettings {
    /// Tools home directory
    pub home: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the config directory and apply environment overrides
    pub fn load(dirs: &ToolsDirs) -> Result<Self, SettingsError> {
        let mut settings = Self::load_from_path(&dirs.config_path())?;
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields defaults; a file with invalid TOML is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_ZIP_CACHE) {
            self.download.reuse_archive = Some(is_truthy(&value));
        }

        if let Some(url) = lookup(ENV_URL).filter(|u| !u.is_empty()) {
            self.download.url = Some(url);
        }
    }

    /// Effective archive URL for a vendor platform key
    pub fn archive_url(&self, platform_key: &str) -> String {
        self.download
            .url
            .clone()
            .unwrap_or_else(|| urls::platform_tools_url(platform_key))
    }

    /// Effective number of download attempts
    pub fn attempts(&self) -> u32 {
        self.download
            .attempts
            .unwrap_or(defaults::DOWNLOAD_ATTEMPTS)
    }

    /// Whether a previously downloaded archive may be reused
    pub fn reuse_archive(&self) -> bool {
        self.download.reuse_archive.unwrap_or(false)
    }

    /// Expected archive checksum, if pinned
    pub fn sha256(&self) -> Option<&str> {
        self.download.sha256.as_deref()
    }

    /// Directories with the configured home applied
    ///
    /// `PLATFORM_TOOLS_HOME` has already been folded into `dirs` and wins
    /// over the config file.
    pub fn resolve_dirs(&self, dirs: ToolsDirs) -> ToolsDirs {
        let env_home_set = std::env::var_os(crate::infra::dirs::ENV_HOME_DIR)
            .is_some_and(|v| !v.is_empty());

        match &self.paths.home {
            Some(home) if !env_home_set => dirs.with_home(home.clone()),
            _ => dirs,
        }
    }
}

/// Interpret an environment flag value
///
/// Anything except empty, `0`, `false`, `no` and `off` counts as set.
pub fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
