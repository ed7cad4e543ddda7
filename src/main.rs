//! platform-tools CLI
//!
//! Entry point for managing the cached Android SDK platform-tools.

use anyhow::Result;
use clap::Parser;

use platform_tools::cli::output::display_error;
use platform_tools::cli::{init_tracing, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
