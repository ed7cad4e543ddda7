//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod clean;
pub mod download;
pub mod info;
pub mod paths;

use anyhow::Result;
use clap::Subcommand;

use crate::core::install::PlatformTools;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download and extract platform-tools if missing
    Download {
        /// Download even if the tools are already extracted
        #[arg(short, long)]
        force: bool,

        /// Reuse a previously downloaded archive (same as ADB_ZIP_CACHE=1)
        #[arg(long)]
        reuse_archive: bool,
    },

    /// Print the paths of the extracted tools
    Paths {
        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show install location, cache state and host platform
    Info,

    /// Remove the extracted tools
    Clean {
        /// Also remove downloaded archives
        #[arg(long)]
        all: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self, quiet: bool) -> Result<()> {
        let mut tools = PlatformTools::from_env()?;

        match self {
            Self::Download {
                force,
                reuse_archive,
            } => {
                if reuse_archive {
                    let mut settings = tools.settings().clone();
                    settings.download.reuse_archive = Some(true);
                    tools = PlatformTools::new(tools.dirs().clone(), settings);
                }
                download::execute(&tools, force, quiet).await
            }
            Self::Paths { json } => paths::execute(&tools, json),
            Self::Info => info::execute(&tools),
            Self::Clean { all } => clean::execute(&tools, all),
        }
    }
}
