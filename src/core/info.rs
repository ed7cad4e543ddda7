//! Install status report
//!
//! Summarizes where the tools live, what is cached and whether another
//! `adb` on `PATH` could shadow the bundled one.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::install::PlatformTools;
use crate::core::tools::Tool;

/// Install status
#[derive(Debug, Clone, Serialize)]
pub struct InstallInfo {
    /// Tools home directory
    pub home: PathBuf,
    /// Host platform, e.g. `linux-x86_64`
    pub host: String,
    /// Vendor archive key, if the host is supported
    pub platform_key: Option<&'static str>,
    /// Vendor archive URL, if the host is supported
    pub archive_url: Option<String>,
    /// Whether the required tools are extracted
    pub installed: bool,
    /// Downloaded archive path, if present
    pub archive: Option<PathBuf>,
    /// Bytes used by the home directory
    pub size_bytes: u64,
    /// Another `adb` found on `PATH`
    pub system_adb: Option<PathBuf>,
}

impl InstallInfo {
    /// Gather status for a handle
    pub fn collect(tools: &PlatformTools) -> Self {
        let archive = tools.archive_path().ok().filter(|p| p.is_file());
        let system_adb = which::which(Tool::Adb.name())
            .ok()
            .filter(|p| !p.starts_with(tools.dirs().home_dir()));

        Self {
            home: tools.dirs().home_dir().to_path_buf(),
            host: tools.host().to_string(),
            platform_key: tools.platform_key().ok(),
            archive_url: tools.archive_url().ok(),
            installed: tools.is_installed(),
            archive,
            size_bytes: dir_size(tools.dirs().home_dir()),
            system_adb,
        }
    }

    /// Format size for display
    pub fn format_size(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Calculate directory size recursively
pub fn dir_size(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

/// Format a byte count for display
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size_bytes: u64) -> String {
    if size_bytes < 1024 {
        format!("{size_bytes} bytes")
    } else if size_bytes < 1024 * 1024 {
        format!("{:.1} KB", size_bytes as f64 / 1024.0)
    } else if size_bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", size_bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", size_bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
