//! CLI command for `platform-tools paths`

use anyhow::Result;

use crate::core::install::PlatformTools;

/// Print resolved tool paths; never downloads
pub fn execute(tools: &PlatformTools, json: bool) -> Result<()> {
    let paths = tools.tool_paths()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    println!("platform-tools  {}", paths.platform_tools.display());
    for (tool, path) in paths.iter() {
        println!("{:<15} {}", tool.name(), path.display());
    }

    Ok(())
}
