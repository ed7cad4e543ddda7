//! Default configuration values

/// Download attempts per archive fetch (1 = no retry)
pub const DOWNLOAD_ATTEMPTS: u32 = 1;

/// Base delay between download attempts (in milliseconds)
pub const RETRY_BASE_DELAY_MS: u64 = 1000;

/// Upper bound for the delay between download attempts (in milliseconds)
pub const RETRY_MAX_DELAY_MS: u64 = 30_000;

/// HTTP request timeout (in seconds); the archive is roughly 10 MB
pub const HTTP_TIMEOUT_SECS: u64 = 300;

/// HTTP connect timeout (in seconds)
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Name of the extracted vendor directory
pub const PLATFORM_TOOLS_SUBDIR: &str = "platform-tools";

/// Name of the directory holding fetched archives
pub const DOWNLOADS_SUBDIR: &str = "downloads";

/// Name of the config file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
