//! `adb` shim - runs the bundled Android Debug Bridge

use platform_tools::cli::shim;
use platform_tools::Tool;

#[tokio::main]
async fn main() {
    let code = shim::main(Tool::Adb).await;
    std::process::exit(code);
}
