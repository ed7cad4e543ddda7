//! CLI command for `platform-tools clean`

use anyhow::Result;

use crate::cli::output::status;
use crate::core::info::format_size;
use crate::core::install::PlatformTools;

/// Remove extracted tools, and archives when `all` is set
pub fn execute(tools: &PlatformTools, all: bool) -> Result<()> {
    let freed = tools.remove(all)?;

    if freed > 0 {
        println!("{} Removed ({} freed)", status::SUCCESS, format_size(freed));
    } else {
        println!("{} Nothing to remove", status::SUCCESS);
    }

    Ok(())
}
