//! CLI command for `platform-tools download`

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::sync::{Arc, Mutex};

use crate::cli::output::{create_download_bar, create_spinner, status};
use crate::core::info::format_size;
use crate::core::install::{InstallObserver, PlatformTools};

/// The bar currently on screen: download bar first, then extraction spinner
type ActiveBar = Arc<Mutex<Option<ProgressBar>>>;

/// Execute the download command
pub async fn execute(tools: &PlatformTools, force: bool, quiet: bool) -> Result<()> {
    if !force && tools.is_installed() {
        println!(
            "{} platform-tools already installed at {}",
            status::SUCCESS,
            tools.dirs().platform_tools_dir().display()
        );
        return Ok(());
    }

    let active: ActiveBar = Arc::new(Mutex::new(None));
    let observer = if quiet {
        InstallObserver::default()
    } else {
        progress_observer(&active)
    };

    let result = tools.download_tools_with(observer).await;
    clear(&active);
    let summary = result.context("Failed to install platform-tools")?;

    println!("{} {}", status::SUCCESS, summary.message);
    println!(
        "   Archive: {} ({})",
        summary.zip_path.display(),
        format_size(summary.size)
    );
    println!("   SHA-256: {}", summary.checksum);

    Ok(())
}

fn progress_observer(active: &ActiveBar) -> InstallObserver {
    let on_progress_bar = Arc::clone(active);
    let on_extract_bar = Arc::clone(active);

    InstallObserver {
        on_progress: Some(Box::new(move |downloaded, total| {
            if let Ok(mut slot) = on_progress_bar.lock() {
                let pb = slot.get_or_insert_with(|| create_download_bar(total));
                pb.set_position(downloaded);
            }
        })),
        on_extract: Some(Box::new(move |archive| {
            if let Ok(mut slot) = on_extract_bar.lock() {
                if let Some(pb) = slot.take() {
                    pb.finish_and_clear();
                }
                *slot = Some(create_spinner(&format!(
                    "Extracting {}",
                    archive.display()
                )));
            }
        })),
    }
}

fn clear(active: &ActiveBar) {
    if let Ok(mut slot) = active.lock() {
        if let Some(pb) = slot.take() {
            pb.finish_and_clear();
        }
    }
}
