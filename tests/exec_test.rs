//! Integration tests for running the bundled tools through the library
//!
//! The installed tools are shell scripts, so these tests are Unix-only.

#![cfg(unix)]

mod common;

use common::{fake_archive, TestHome};
use platform_tools::Tool;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn installed_home() -> TestHome {
    let home = TestHome::new();
    home.install_fake_tools();
    home
}

#[tokio::test]
async fn test_adb_version() {
    let home = installed_home();
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let output = tools.output(Tool::Adb, ["version"]).await.unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Android Debug Bridge version"));
    assert!(out.contains("Installed as"));
    assert!(out.contains("Revision"));
    assert!(stderr(&output).is_empty());
}

#[tokio::test]
async fn test_adb_unknown_command_prints_usage() {
    let home = installed_home();
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let output = tools.output(Tool::Adb, ["garbage"]).await.unwrap();

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("global options:"));
    assert!(out.contains("general commands:"));
    assert!(out.contains("environment variables:"));
}

#[tokio::test]
async fn test_fastboot_version() {
    let home = installed_home();
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let output = tools.output(Tool::Fastboot, ["--version"]).await.unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("fastboot version"));
    assert!(out.contains("Installed as"));
}

#[tokio::test]
async fn test_fastboot_unknown_option() {
    let home = installed_home();
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let output = tools.output(Tool::Fastboot, ["--garbage"]).await.unwrap();

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("unknown option"));
    assert!(err.contains("-- garbage"));
}

#[tokio::test]
async fn test_arguments_are_passed_verbatim() {
    let home = installed_home();
    common::write_executable(
        &Tool::Adb.path_in(&home.platform_tools_dir()),
        "#!/bin/sh\nfor arg in \"$@\"; do echo \"[$arg]\"; done\n",
    );
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let output = tools
        .output(Tool::Adb, ["shell", "echo hello world", "", "--flag=a b"])
        .await
        .unwrap();

    assert_eq!(
        stdout(&output),
        "[shell]\n[echo hello world]\n[]\n[--flag=a b]\n"
    );
}

#[tokio::test]
async fn test_exit_code_is_preserved() {
    let home = installed_home();
    common::write_executable(
        &Tool::Fastboot.path_in(&home.platform_tools_dir()),
        "#!/bin/sh\nexit 42\n",
    );
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let status = tools.status(Tool::Fastboot, ["devices"]).await.unwrap();

    assert_eq!(status.code(), Some(42));
    assert_eq!(platform_tools::core::exec::exit_code(status), 42);
}

#[tokio::test]
async fn test_output_downloads_missing_tools() {
    let home = TestHome::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(fake_archive()))
        .expect(1)
        .mount(&server)
        .await;
    let tools = home.tools(&format!("{}/platform-tools.zip", server.uri()));

    let output = tools.output(Tool::Adb, ["devices"]).await.unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("List of devices attached"));
    assert!(tools.is_installed());
}

#[tokio::test]
async fn test_missing_optional_tool_is_reported() {
    let home = installed_home();
    let tools = home.tools("http://127.0.0.1:9/unused.zip");

    let err = tools.output(Tool::Etc1tool, ["--help"]).await.unwrap_err();

    assert!(err.to_string().contains("etc1tool"));
}
