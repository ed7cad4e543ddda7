//! Zip extraction for the vendor archive
//!
//! Entries whose names would escape the destination are skipped. Unix mode
//! bits stored in the archive are applied so `adb`/`fastboot` stay executable.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::ExtractError;

/// Extract a zip archive into `dest_dir`, returning the number of files written
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize, ExtractError> {
    tracing::info!(
        "Extracting {} to {}",
        archive_path.display(),
        dest_dir.display()
    );

    fs::create_dir_all(dest_dir).map_err(|e| io_error(dest_dir, &e))?;

    let file = File::open(archive_path).map_err(|e| ExtractError::InvalidArchive {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractError::InvalidArchive {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut files_written = 0;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ExtractError::InvalidArchive {
                path: archive_path.to_path_buf(),
                error: e.to_string(),
            })?;

        let Some(entry_path) = entry.enclosed_name() else {
            tracing::warn!("Skipping unsafe path in zip: {}", entry.name());
            continue;
        };

        let dest_path = dest_dir.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path).map_err(|e| io_error(&dest_path, &e))?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, &e))?;
        }

        let mut outfile = File::create(&dest_path).map_err(|e| io_error(&dest_path, &e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| io_error(&dest_path, &e))?;

        #[cfg(unix)]
        set_unix_permissions(&dest_path, entry.unix_mode())?;

        files_written += 1;
    }

    tracing::debug!("Extracted {files_written} files");
    Ok(files_written)
}

#[cfg(unix)]
fn set_unix_permissions(path: &Path, mode: Option<u32>) -> Result<(), ExtractError> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        let mode = mode & 0o7777;
        // Executables get full rx for group/other, like the vendor SDK manager installs them
        let mode = if mode & 0o111 != 0 { mode | 0o755 } else { mode };
        if mode != 0 {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))
                .map_err(|e| io_error(path, &e))?;
        }
    }

    Ok(())
}

/// Set executable permission on a file (no-op on Windows)
#[allow(unused_variables)]
pub fn make_executable(path: &Path) -> Result<(), ExtractError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| io_error(path, &e))?;
        let mut permissions = metadata.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(path, permissions).map_err(|e| io_error(path, &e))?;
    }

    Ok(())
}

fn io_error(path: &Path, e: &io::Error) -> ExtractError {
    ExtractError::IoError {
        path: path.to_path_buf(),
        error: e.to_string(),
    }
}
