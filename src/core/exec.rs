//! Process execution for bundled tools
//!
//! Arguments are passed through verbatim; nothing is parsed or rewritten.

use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Output, Stdio};
use tokio::process::Command;

use crate::error::ExecError;

/// Run a tool and capture stdout/stderr
pub async fn output<I, S>(program: &Path, args: I) -> Result<Output, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    tracing::debug!("Running {} (captured)", program.display());

    command(program, args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| spawn_failed(program, &e))
}

/// Run a tool with the caller's stdin/stdout/stderr
pub async fn status<I, S>(program: &Path, args: I) -> Result<ExitStatus, ExecError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    tracing::debug!("Running {} (inherited stdio)", program.display());

    command(program, args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| spawn_failed(program, &e))
}

/// Exit code a wrapper should mirror for a child's status
///
/// On Unix a signal-terminated child maps to `128 + signal`, as shells report it.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

fn command<I, S>(program: &Path, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd
}

fn spawn_failed(program: &Path, e: &std::io::Error) -> ExecError {
    ExecError::SpawnFailed {
        path: program.to_path_buf(),
        error: e.to_string(),
    }
}
