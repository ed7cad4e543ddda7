//! Command-line interface module
//!
//! Argument parsing and output formatting for the `platform-tools` binary,
//! plus the pass-through shims behind the `adb` and `fastboot` binaries.
//! Install logic lives in [`crate::core`].

pub mod commands;
pub mod output;
pub mod shim;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::Commands;

/// Download, cache and run the Android SDK platform-tools
#[derive(Parser, Debug)]
#[command(name = "platform-tools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(self.quiet).await
        } else {
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}

/// Install the tracing subscriber
///
/// Logs go to stderr so wrapped tools keep a clean stdout.
pub fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Filter from `RUST_LOG` directives, defaulting to a level raised by `verbose`
///
/// A `RUST_LOG` level applies as given; `verbose` only moves the default.
pub fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}
