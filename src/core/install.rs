//! Install orchestration
//!
//! Check the cache, fetch the archive when needed, extract it through a
//! staging directory and hand back resolved tool paths.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::PLATFORM_TOOLS_SUBDIR;
use crate::config::urls;
use crate::core::exec;
use crate::core::settings::Settings;
use crate::core::tools::{has_required_tools, Tool, ToolPaths};
use crate::error::{
    DownloadError, ExtractError, FilesystemError, PlatformToolsError, Result, ToolsError,
};
use crate::infra::dirs::ToolsDirs;
use crate::infra::download::{file_checksum, DownloadManager, ProgressCallback};
use crate::infra::extract::{extract_zip, make_executable};
use crate::infra::platform::{detect_host_platform, HostPlatform};

/// Archive key used when a configured URL serves a host without a vendor archive
const CUSTOM_ARCHIVE_KEY: &str = "custom";

/// Outcome of an unconditional download
#[derive(Debug, Clone, Serialize)]
pub struct DownloadSummary {
    /// The extracted `platform-tools` directory
    pub path: PathBuf,
    /// The archive the tools were extracted from
    pub zip_path: PathBuf,
    /// Human-readable outcome
    pub message: String,
    /// SHA-256 of the archive
    pub checksum: String,
    /// Archive size in bytes
    pub size: u64,
    /// Whether an existing archive was reused instead of fetched
    pub reused_archive: bool,
}

/// Hooks for reporting install progress
#[derive(Default)]
pub struct InstallObserver {
    /// Called with (`bytes_downloaded`, `total_bytes`) while fetching
    pub on_progress: Option<ProgressCallback>,
    /// Called once before extraction starts
    pub on_extract: Option<Box<dyn Fn(&Path) + Send + Sync>>,
}

/// Handle on a platform-tools install
#[derive(Debug, Clone)]
pub struct PlatformTools {
    dirs: ToolsDirs,
    settings: Settings,
    host: HostPlatform,
    downloader: DownloadManager,
}

impl PlatformTools {
    /// Create a handle from the environment and config file
    pub fn from_env() -> Result<Self> {
        let dirs = ToolsDirs::new();
        let settings = Settings::load(&dirs)?;
        Ok(Self::new(dirs, settings))
    }

    /// Create a handle with explicit directories and settings
    pub fn new(dirs: ToolsDirs, settings: Settings) -> Self {
        let dirs = settings.resolve_dirs(dirs);
        let downloader = DownloadManager::with_config(
            settings.attempts(),
            crate::config::defaults::RETRY_BASE_DELAY_MS,
        );

        Self {
            dirs,
            settings,
            host: detect_host_platform(),
            downloader,
        }
    }

    /// Replace the detected host platform
    #[must_use]
    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    /// Directory layout in use
    pub fn dirs(&self) -> &ToolsDirs {
        &self.dirs
    }

    /// Effective settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Host platform archives are chosen for
    pub fn host(&self) -> &HostPlatform {
        &self.host
    }

    /// Vendor key for the host (`linux`, `darwin`, `windows`)
    pub fn platform_key(&self) -> Result<&'static str> {
        Ok(self.host.archive_key()?)
    }

    /// URL the archive is fetched from
    ///
    /// A configured URL works on any host, including ones the vendor does not publish for.
    pub fn archive_url(&self) -> Result<String> {
        match &self.settings.download.url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.settings.archive_url(self.platform_key()?)),
        }
    }

    /// Where the fetched archive is stored
    pub fn archive_path(&self) -> Result<PathBuf> {
        let key = match (&self.settings.download.url, self.host.archive_key()) {
            (_, Ok(key)) => key,
            (Some(_), Err(_)) => CUSTOM_ARCHIVE_KEY,
            (None, Err(e)) => return Err(e.into()),
        };

        Ok(self.dirs.downloads_dir().join(urls::archive_file_name(key)))
    }

    /// Whether the extracted directory holds every required tool
    pub fn is_installed(&self) -> bool {
        has_required_tools(&self.dirs.platform_tools_dir())
    }

    /// Resolve tool paths without downloading
    pub fn tool_paths(&self) -> Result<ToolPaths> {
        Ok(ToolPaths::resolve(&self.dirs.platform_tools_dir())?)
    }

    /// Path of a single tool without downloading
    pub fn tool_path(&self, tool: Tool) -> Result<PathBuf> {
        let paths = self.tool_paths()?;
        Ok(paths.require(tool)?.to_path_buf())
    }

    /// Download and extract unconditionally
    ///
    /// With archive reuse enabled and an archive already on disk, no HTTP
    /// request is made; only the extraction is redone. A cached archive that
    /// cannot be read or fails the pinned checksum is discarded and fetched again.
    pub async fn download_tools(&self) -> Result<DownloadSummary> {
        self.download_tools_with(InstallObserver::default()).await
    }

    /// [`Self::download_tools`] with progress hooks
    pub async fn download_tools_with(&self, observer: InstallObserver) -> Result<DownloadSummary> {
        let zip_path = self.archive_path()?;

        if self.settings.reuse_archive() && zip_path.is_file() {
            match self.install_cached(&zip_path, &observer).await {
                Ok(summary) => return Ok(summary),
                Err(
                    e @ (PlatformToolsError::Extract(ExtractError::InvalidArchive { .. })
                    | PlatformToolsError::Download(DownloadError::ChecksumFailed { .. })),
                ) => {
                    tracing::warn!("Discarding cached archive: {e}");
                    fs::remove_file(&zip_path).map_err(|e| FilesystemError::Remove {
                        path: zip_path.clone(),
                        error: e.to_string(),
                    })?;
                }
                Err(e) => return Err(e),
            }
        }

        let url = self.archive_url()?;
        tracing::info!("Downloading {url}");
        let result = self
            .downloader
            .download_verified(&url, &zip_path, self.settings.sha256(), observer.on_progress)
            .await?;
        tracing::info!("Downloaded {} bytes to {}", result.size, zip_path.display());

        if let Some(on_extract) = &observer.on_extract {
            on_extract(&zip_path);
        }

        let path = self.install_archive(&zip_path).await?;

        Ok(DownloadSummary {
            message: format!("Downloaded platform-tools to {}", path.display()),
            path,
            zip_path,
            checksum: result.checksum,
            size: result.size,
            reused_archive: false,
        })
    }

    /// Download if the tools are missing, then resolve their paths
    pub async fn download_and_return_tool_paths(&self) -> Result<ToolPaths> {
        self.ensure_installed_with(InstallObserver::default()).await
    }

    /// [`Self::download_and_return_tool_paths`] with progress hooks
    pub async fn ensure_installed_with(&self, observer: InstallObserver) -> Result<ToolPaths> {
        if self.is_installed() {
            tracing::debug!(
                "platform-tools already present at {}",
                self.dirs.platform_tools_dir().display()
            );
        } else {
            self.download_tools_with(observer).await?;
        }

        self.tool_paths()
    }

    /// Remove the extracted tools, and the downloaded archives when `archives` is set
    ///
    /// Returns the number of bytes freed.
    pub fn remove(&self, archives: bool) -> Result<u64> {
        let mut targets = vec![self.dirs.platform_tools_dir()];
        if archives {
            targets.push(self.dirs.downloads_dir());
        }

        let mut freed = 0;
        for target in targets.into_iter().filter(|t| t.exists()) {
            freed += crate::core::info::dir_size(&target);
            tracing::info!("Removing {}", target.display());
            fs::remove_dir_all(&target).map_err(|e| FilesystemError::Remove {
                path: target.clone(),
                error: e.to_string(),
            })?;
        }

        Ok(freed)
    }

    /// Run a tool with captured stdout/stderr, downloading it first if needed
    pub async fn output<I, S>(&self, tool: Tool, args: I) -> Result<std::process::Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let paths = self.download_and_return_tool_paths().await?;
        Ok(exec::output(paths.require(tool)?, args).await?)
    }

    /// Run a tool with inherited stdio, downloading it first if needed
    pub async fn status<I, S>(&self, tool: Tool, args: I) -> Result<std::process::ExitStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let paths = self.download_and_return_tool_paths().await?;
        Ok(exec::status(paths.require(tool)?, args).await?)
    }

    /// Extract a previously downloaded archive
    async fn install_cached(
        &self,
        zip_path: &Path,
        observer: &InstallObserver,
    ) -> Result<DownloadSummary> {
        tracing::info!("Reusing cached archive {}", zip_path.display());

        let checksum = file_checksum(zip_path)?;
        if let Some(expected) = self.settings.sha256() {
            if !checksum.eq_ignore_ascii_case(expected) {
                return Err(DownloadError::ChecksumFailed {
                    file: zip_path.display().to_string(),
                    expected: expected.to_lowercase(),
                    actual: checksum,
                }
                .into());
            }
        }

        let size = fs::metadata(zip_path)
            .map_err(|e| DownloadError::IoError {
                path: zip_path.to_path_buf(),
                error: e.to_string(),
            })?
            .len();

        if let Some(on_extract) = &observer.on_extract {
            on_extract(zip_path);
        }

        let path = self.install_archive(zip_path).await?;

        Ok(DownloadSummary {
            message: format!(
                "Extracted platform-tools to {} from cached archive",
                path.display()
            ),
            path,
            zip_path: zip_path.to_path_buf(),
            checksum,
            size,
            reused_archive: true,
        })
    }

    /// Extract an archive through the staging directory and move it into place
    async fn install_archive(&self, zip_path: &Path) -> Result<PathBuf> {
        let staging = self.dirs.staging_dir();
        let target = self.dirs.platform_tools_dir();

        remove_if_exists(&staging)?;

        let archive = zip_path.to_path_buf();
        let staging_clone = staging.clone();
        let extracted = tokio::task::spawn_blocking(move || extract_zip(&archive, &staging_clone))
            .await
            .map_err(|e| ExtractError::IoError {
                path: staging.clone(),
                error: e.to_string(),
            })?;

        let result = extracted
            .map_err(PlatformToolsError::from)
            .and_then(|_| promote_staging(&staging, &target));

        // Staging is disposable whether or not the move succeeded
        let _ = fs::remove_dir_all(&staging);
        result?;

        for tool in Tool::ALL.into_iter().filter(|t| t.is_required()) {
            make_executable(&tool.path_in(&target))?;
        }

        Ok(target)
    }
}

/// Move the extracted tree from staging to its final location
///
/// The vendor archive nests everything under `platform-tools/`; an archive
/// without that folder is used as-is.
fn promote_staging(staging: &Path, target: &Path) -> Result<()> {
    let nested = staging.join(PLATFORM_TOOLS_SUBDIR);
    let source = if nested.is_dir() {
        nested
    } else {
        staging.to_path_buf()
    };

    if !has_required_tools(&source) {
        let missing = Tool::ALL
            .into_iter()
            .find(|t| t.is_required() && !t.path_in(&source).is_file())
            .unwrap_or(Tool::Adb);
        return Err(ToolsError::MissingTool {
            tool: missing.name().to_string(),
            path: source,
        }
        .into());
    }

    swap_into_place(&source, target)?;

    tracing::debug!("Installed platform-tools at {}", target.display());
    Ok(())
}

/// Rename `source` to `target`, keeping any existing `target` until the move succeeds
fn swap_into_place(source: &Path, target: &Path) -> Result<()> {
    let mut backup = target.as_os_str().to_owned();
    backup.push(".previous");
    let backup = PathBuf::from(backup);

    remove_if_exists(&backup)?;

    let had_previous = target.exists();
    if had_previous {
        fs::rename(target, &backup).map_err(|e| FilesystemError::Rename {
            from: target.to_path_buf(),
            to: backup.clone(),
            error: e.to_string(),
        })?;
    }

    if let Err(e) = fs::rename(source, target) {
        if had_previous {
            if let Err(restore) = fs::rename(&backup, target) {
                tracing::warn!(
                    "Could not restore previous install from {}: {restore}",
                    backup.display()
                );
            }
        }
        return Err(FilesystemError::Rename {
            from: source.to_path_buf(),
            to: target.to_path_buf(),
            error: e.to_string(),
        }
        .into());
    }

    if had_previous {
        remove_if_exists(&backup)?;
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| FilesystemError::Remove {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}
