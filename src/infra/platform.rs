//! Host platform detection
//!
//! Maps the running OS/architecture to the key the vendor uses in
//! platform-tools archive names.

use std::fmt;

use crate::error::ToolsError;

/// Host platform identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    /// Linux on x86_64
    LinuxX86_64,
    /// macOS on x86_64 (Intel)
    DarwinX86_64,
    /// macOS on aarch64 (Apple Silicon)
    DarwinAarch64,
    /// Windows on x86, x86_64 or aarch64
    Windows(String),
    /// Platform without a vendor archive
    Unknown(String),
}

impl HostPlatform {
    /// Build a platform from `std::env::consts`-style OS and architecture names
    pub fn from_parts(os: &str, arch: &str) -> Self {
        match (os, arch) {
            ("linux", "x86_64") => Self::LinuxX86_64,
            ("macos", "x86_64") => Self::DarwinX86_64,
            ("macos", "aarch64") => Self::DarwinAarch64,
            ("windows", "x86" | "x86_64" | "aarch64") => Self::Windows(arch.to_string()),
            _ => Self::Unknown(format!("{os}-{arch}")),
        }
    }

    /// Archive key used in `platform-tools-latest-<key>.zip`
    ///
    /// The macOS archive is universal, the Windows one runs under emulation on ARM.
    pub fn archive_key(&self) -> Result<&'static str, ToolsError> {
        match self {
            Self::LinuxX86_64 => Ok("linux"),
            Self::DarwinX86_64 | Self::DarwinAarch64 => Ok("darwin"),
            Self::Windows(_) => Ok("windows"),
            Self::Unknown(host) => Err(ToolsError::UnsupportedPlatform { host: host.clone() }),
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPlatform::LinuxX86_64 => write!(f, "linux-x86_64"),
            HostPlatform::DarwinX86_64 => write!(f, "darwin-x86_64"),
            HostPlatform::DarwinAarch64 => write!(f, "darwin-aarch64"),
            HostPlatform::Windows(arch) => write!(f, "windows-{arch}"),
            HostPlatform::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Detect the current host platform
pub fn detect_host_platform() -> HostPlatform {
    HostPlatform::from_parts(std::env::consts::OS, std::env::consts::ARCH)
}
