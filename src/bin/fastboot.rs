//! `fastboot` shim - runs the bundled fastboot

use platform_tools::cli::shim;
use platform_tools::Tool;

#[tokio::main]
async fn main() {
    let code = shim::main(Tool::Fastboot).await;
    std::process::exit(code);
}
