//! Vendor download URLs

/// Base URL of the Android SDK repository hosting platform-tools archives
pub const ANDROID_REPOSITORY: &str = "https://dl.google.com/android/repository";

/// Archive file name for a vendor platform key (`linux`, `darwin`, `windows`)
pub fn archive_file_name(platform_key: &str) -> String {
    format!("platform-tools-latest-{platform_key}.zip")
}

/// Full download URL of the latest platform-tools archive for a platform key
pub fn platform_tools_url(platform_key: &str) -> String {
    format!("{ANDROID_REPOSITORY}/{}", archive_file_name(platform_key))
}
