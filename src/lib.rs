//! android-platform-tools - download, cache and run the Android SDK platform-tools
//!
//! Fetches the vendor `platform-tools` archive for the host OS, extracts it to
//! a cache directory and runs the bundled `adb` / `fastboot` executables.
//!
//! ```no_run
//! # async fn demo() -> platform_tools::error::Result<()> {
//! let paths = platform_tools::download_and_return_tool_paths().await?;
//! println!("adb is at {}", paths.adb.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`cli`] - Management CLI, output formatting and the adb/fastboot shims
//! - [`core`] - Settings, tool table, install orchestration and process spawning
//! - [`infra`] - Directories, host detection, HTTP download and zip extraction
//! - [`config`] - URLs and defaults
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

pub use crate::core::install::{DownloadSummary, PlatformTools};
pub use crate::core::tools::{Tool, ToolPaths};
pub use crate::error::PlatformToolsError;

/// Download and extract the tools unconditionally, using environment settings
pub async fn download_tools() -> error::Result<DownloadSummary> {
    PlatformTools::from_env()?.download_tools().await
}

/// Download the tools if missing and return their absolute paths
pub async fn download_and_return_tool_paths() -> error::Result<ToolPaths> {
    PlatformTools::from_env()?
        .download_and_return_tool_paths()
        .await
}

/// Return the paths of already extracted tools without downloading
pub fn get_tool_paths() -> error::Result<ToolPaths> {
    PlatformTools::from_env()?.tool_paths()
}
