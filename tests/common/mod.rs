//! Common test utilities and helpers
//!
//! Provides isolated tool homes and a synthetic platform-tools archive whose
//! `adb` / `fastboot` are shell scripts imitating the vendor output.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use platform_tools::core::settings::Settings;
use platform_tools::infra::dirs::ToolsDirs;
use platform_tools::infra::platform::HostPlatform;
use platform_tools::{PlatformTools, Tool};

/// Stand-in for the vendor `adb`
pub const FAKE_ADB: &str = r#"#!/bin/sh
banner() {
    echo "Android Debug Bridge version 1.0.41"
    echo "Version 35.0.2-12147458"
    echo "Installed as $0"
}
case "$1" in
    version)
        banner
        echo "Running on Linux 6.1.0 (x86_64)"
        echo "Revision 12147458"
        ;;
    devices)
        echo "List of devices attached"
        echo ""
        ;;
    kill-server|start-server)
        ;;
    *)
        banner
        echo ""
        echo "global options:"
        echo " -a                       listen on all network interfaces"
        echo "general commands:"
        echo " devices [-l]             list connected devices"
        echo "environment variables:"
        echo " \$ADB_TRACE              comma-separated list of debug info to log"
        exit 1
        ;;
esac
"#;

/// Stand-in for the vendor `fastboot`
pub const FAKE_FASTBOOT: &str = r#"#!/bin/sh
case "$1" in
    --version)
        echo "fastboot version 35.0.2-12147458"
        echo "Installed as $0"
        ;;
    --help)
        echo "usage: fastboot [OPTION...] COMMAND..." >&2
        echo "flashing:" >&2
        echo " flashing lock|unlock     lock/unlock partitions for flashing" >&2
        echo " erase PARTITION          erase a flash partition" >&2
        echo " update <filename>        flash all partitions from an update.zip" >&2
        exit 1
        ;;
    --*)
        echo "fastboot: unknown option -- ${1#--}" >&2
        exit 1
        ;;
    *)
        echo "fastboot: usage: unknown command $1" >&2
        exit 1
        ;;
esac
"#;

/// Build an in-memory zip laid out like the vendor archive
pub fn fake_archive() -> Vec<u8> {
    fake_archive_with(&[
        (Tool::Adb.file_name(), FAKE_ADB),
        (Tool::Fastboot.file_name(), FAKE_FASTBOOT),
        (Tool::Sqlite3.file_name(), "#!/bin/sh\necho 'SQLite version 3.44.0'\n"),
    ])
}

/// Build an in-memory zip with the given files under `platform-tools/`
pub fn fake_archive_with(files: &[(String, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

    let exec = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    let plain = zip::write::SimpleFileOptions::default().unix_permissions(0o644);

    zip.add_directory("platform-tools/", exec)
        .expect("Failed to add directory");
    for (name, body) in files {
        zip.start_file(format!("platform-tools/{name}"), exec)
            .expect("Failed to start file");
        zip.write_all(body.as_bytes()).expect("Failed to write file");
    }
    zip.start_file("platform-tools/NOTICE.txt", plain)
        .expect("Failed to start file");
    zip.write_all(b"Android SDK platform-tools test archive\n")
        .expect("Failed to write file");

    zip.finish().expect("Failed to finish zip").into_inner()
}

/// Isolated tools home and config directory
pub struct TestHome {
    /// Temporary directory holding both
    pub dir: TempDir,
}

impl TestHome {
    /// Create a new test home in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Tools home directory
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// Config directory
    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Extracted platform-tools directory
    pub fn platform_tools_dir(&self) -> PathBuf {
        self.home().join("platform-tools")
    }

    /// Directory layout rooted in this home
    pub fn dirs(&self) -> ToolsDirs {
        ToolsDirs::with_dirs(self.home(), self.config_dir())
    }

    /// Handle downloading from `url`, pinned to a host with a vendor archive
    pub fn tools(&self, url: &str) -> PlatformTools {
        let mut settings = Settings::default();
        settings.download.url = Some(url.to_string());
        self.tools_with(settings)
    }

    /// Handle with explicit settings
    pub fn tools_with(&self, settings: Settings) -> PlatformTools {
        PlatformTools::new(self.dirs(), settings).with_host(HostPlatform::LinuxX86_64)
    }

    /// Write the fake tools straight into the platform-tools directory
    pub fn install_fake_tools(&self) {
        let dir = self.platform_tools_dir();
        std::fs::create_dir_all(&dir).expect("Failed to create platform-tools");
        write_executable(&Tool::Adb.path_in(&dir), FAKE_ADB);
        write_executable(&Tool::Fastboot.path_in(&dir), FAKE_FASTBOOT);
    }

    /// Command for one of the crate binaries, isolated to this home
    pub fn command(&self, bin: &str) -> Command {
        let mut cmd = Command::new(bin);
        self.isolate(&mut cmd);
        cmd
    }

    /// Async command for one of the crate binaries, isolated to this home
    pub fn async_command(&self, bin: &str) -> tokio::process::Command {
        let mut cmd = Command::new(bin);
        self.isolate(&mut cmd);
        tokio::process::Command::from(cmd)
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.env("PLATFORM_TOOLS_HOME", self.home())
            .env("PLATFORM_TOOLS_CONFIG_DIR", self.config_dir())
            .env_remove("PLATFORM_TOOLS_URL")
            .env_remove("ADB_ZIP_CACHE")
            .env_remove("RUST_LOG");
    }
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a file and mark it executable
pub fn write_executable(path: &Path, body: &str) {
    std::fs::write(path, body).expect("Failed to write file");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
}
