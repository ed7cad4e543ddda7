//! Pass-through entry points for the `adb` and `fastboot` binaries
//!
//! The shim downloads the tools on first use, then runs the bundled
//! executable with the process arguments untouched and exits with its code.

use std::ffi::OsString;

use crate::core::exec;
use crate::core::install::PlatformTools;
use crate::core::tools::Tool;
use crate::error::Result;

/// Resolve `tool` (downloading if needed) and run it with `args`
///
/// Returns the exit code the wrapper should exit with.
pub async fn run(tool: Tool, args: Vec<OsString>) -> Result<i32> {
    let tools = PlatformTools::from_env()?;
    let paths = tools.download_and_return_tool_paths().await?;
    let program = paths.require(tool)?;

    tracing::debug!("Forwarding {} args to {}", args.len(), program.display());

    let status = exec::status(program, args).await?;
    Ok(exec::exit_code(status))
}

/// Entry point shared by the shim binaries
///
/// Provisioning failures are reported as `<tool>: <error>` with exit code 1.
pub async fn main(tool: Tool) -> i32 {
    crate::cli::init_tracing(0);

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match run(tool, args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{tool}: {e}");
            1
        }
    }
}
