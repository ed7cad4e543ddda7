//! CLI command for `platform-tools info`

use anyhow::Result;

use crate::cli::output::status;
use crate::core::info::InstallInfo;
use crate::core::install::PlatformTools;

/// Print install location, cache state and host platform
pub fn execute(tools: &PlatformTools) -> Result<()> {
    let info = InstallInfo::collect(tools);

    println!("📦 platform-tools\n");
    println!("Home: {}", info.home.display());
    match info.platform_key {
        Some(key) => println!("Host: {} ({key})", info.host),
        None => println!("Host: {}", info.host),
    }
    match &info.archive_url {
        Some(url) => println!("Source: {url}"),
        None => println!("{} No vendor archive for this host", status::WARNING),
    }
    println!("Size: {}", info.format_size());

    if info.installed {
        println!("{} Installed", status::SUCCESS);
    } else {
        println!("{} Not installed (run 'platform-tools download')", status::ERROR);
    }

    match &info.archive {
        Some(archive) => println!("{} Archive cached at {}", status::INFO, archive.display()),
        None => println!("{} No cached archive", status::INFO),
    }

    if let Some(adb) = &info.system_adb {
        println!(
            "{} Another adb is on PATH: {} (its server may conflict with the bundled one)",
            status::WARNING,
            adb.display()
        );
    }

    Ok(())
}
