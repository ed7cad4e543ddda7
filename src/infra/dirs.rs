//! Platform-specific directory management
//!
//! Provides the tools home (extracted platform-tools plus downloaded archives)
//! and the config directory. Linux follows XDG, macOS uses `~/Library`.
//!
//! Environment variables can override default directories:
//! - `PLATFORM_TOOLS_HOME` - Override the tools home directory
//! - `PLATFORM_TOOLS_CONFIG_DIR` - Override config directory

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::{CONFIG_FILE_NAME, DOWNLOADS_SUBDIR, PLATFORM_TOOLS_SUBDIR};

/// Environment variable names for directory overrides
pub const ENV_HOME_DIR: &str = "PLATFORM_TOOLS_HOME";
pub const ENV_CONFIG_DIR: &str = "PLATFORM_TOOLS_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "android-platform-tools";

/// Prefix of the staging directory used while extracting
const STAGING_PREFIX: &str = ".platform-tools-staging";

/// Directory provider for the tools cache and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsDirs {
    home_dir: PathBuf,
    config_dir: PathBuf,
}

impl ToolsDirs {
    /// Create a new `ToolsDirs` instance
    ///
    /// Checks environment variables first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            home_dir: Self::resolve_home_dir(),
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Create an instance rooted at explicit directories
    #[must_use]
    pub fn with_dirs(home_dir: impl Into<PathBuf>, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            config_dir: config_dir.into(),
        }
    }

    /// Replace the tools home, keeping the config directory
    #[must_use]
    pub fn with_home(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = home_dir.into();
        self
    }

    /// Get the tools home directory
    ///
    /// - Linux: `$XDG_CACHE_HOME/android-platform-tools` or `~/.cache/android-platform-tools`
    /// - macOS: `~/Library/Caches/android-platform-tools`
    #[must_use]
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// Get the config directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory the vendor archive is extracted to
    #[must_use]
    pub fn platform_tools_dir(&self) -> PathBuf {
        self.home_dir.join(PLATFORM_TOOLS_SUBDIR)
    }

    /// Directory holding downloaded archives
    #[must_use]
    pub fn downloads_dir(&self) -> PathBuf {
        self.home_dir.join(DOWNLOADS_SUBDIR)
    }

    /// Staging directory for an in-progress extraction
    ///
    /// Keyed by process id so concurrent installers do not share a staging tree.
    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.home_dir
            .join(format!("{STAGING_PREFIX}-{}", std::process::id()))
    }

    /// Get the config file path
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    fn resolve_home_dir() -> PathBuf {
        if let Some(path) = env::var_os(ENV_HOME_DIR).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        Self::platform_cache_dir()
    }

    fn resolve_config_dir() -> PathBuf {
        if let Some(path) = env::var_os(ENV_CONFIG_DIR).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        Self::platform_config_dir()
    }

    /// Get platform-specific cache directory
    fn platform_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".cache").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".cache").join(APP_NAME))
            })
    }

    /// Get platform-specific config directory
    fn platform_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            })
    }
}

impl Default for ToolsDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_new_creates_instance() {
        let dirs = ToolsDirs::new();
        assert!(!dirs.home_dir().as_os_str().is_empty());
        assert!(!dirs.config_dir().as_os_str().is_empty());
    }

    #[test]
    fn test_layout_is_under_home() {
        let dirs = ToolsDirs::with_dirs("/tmp/apt-home", "/tmp/apt-config");
        assert_eq!(
            dirs.platform_tools_dir(),
            PathBuf::from("/tmp/apt-home/platform-tools")
        );
        assert_eq!(dirs.downloads_dir(), PathBuf::from("/tmp/apt-home/downloads"));
        assert!(dirs.staging_dir().starts_with("/tmp/apt-home"));
        assert_ne!(dirs.staging_dir(), dirs.platform_tools_dir());
    }

    #[test]
    fn test_config_path_is_under_config_dir() {
        let dirs = ToolsDirs::with_dirs("/tmp/apt-home", "/tmp/apt-config");
        assert!(dirs.config_path().starts_with(dirs.config_dir()));
        assert!(dirs.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_with_home_keeps_config_dir() {
        let dirs = ToolsDirs::with_dirs("/a", "/b").with_home("/c");
        assert_eq!(dirs.home_dir(), Path::new("/c"));
        assert_eq!(dirs.config_dir(), Path::new("/b"));
    }
}
