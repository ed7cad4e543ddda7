//! Error types for android-platform-tools
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Checksum verification failed
    #[error("Checksum verification failed for '{file}': expected {expected}, got {actual}")]
    ChecksumFailed {
        file: String,
        expected: String,
        actual: String,
    },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },

    /// Max retries exceeded
    #[error("Download failed after {attempts} attempts: {url}")]
    AttemptsExhausted { url: String, attempts: u32 },
}

/// Archive extraction errors
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Archive could not be opened or is not a zip file
    #[error("Failed to read archive '{path}': {error}")]
    InvalidArchive { path: PathBuf, error: String },

    /// IO error while writing extracted files
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Tool resolution errors
#[derive(Error, Debug)]
pub enum ToolsError {
    /// Host OS/architecture has no vendor archive
    #[error("No platform-tools archive is published for host platform '{host}'")]
    UnsupportedPlatform { host: String },

    /// platform-tools directory is missing
    #[error("platform-tools not found at '{path}'. Run 'platform-tools download' first.")]
    NotInstalled { path: PathBuf },

    /// A required executable is missing from the extracted directory
    #[error("'{tool}' not found in platform-tools at '{path}'")]
    MissingTool { tool: String, path: PathBuf },

    /// Unknown logical tool name
    #[error("Unknown tool '{name}'")]
    UnknownTool { name: String },
}

/// Process execution errors
#[derive(Error, Debug)]
pub enum ExecError {
    /// Failed to spawn or wait for the child process
    #[error("Failed to run '{path}': {error}")]
    SpawnFailed { path: PathBuf, error: String },
}

/// Settings file errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to remove directory or file
    #[error("Failed to remove '{path}': {error}")]
    Remove { path: PathBuf, error: String },

    /// Failed to move a directory into place
    #[error("Failed to move '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum PlatformToolsError {
    /// Download error
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Tool resolution error
    #[error("{0}")]
    Tools(#[from] ToolsError),

    /// Execution error
    #[error("{0}")]
    Exec(#[from] ExecError),

    /// Settings error
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

/// Result alias used by the library API
pub type Result<T, E = PlatformToolsError> = std::result::Result<T, E>;
