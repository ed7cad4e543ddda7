//! Core logic
//!
//! # Submodules
//!
//! - [`settings`] - Config file and environment overrides
//! - [`tools`] - Bundled tool table and path resolution
//! - [`install`] - Download, extract and cache orchestration
//! - [`exec`] - Running bundled tools
//! - [`info`] - Install status report

pub mod exec;
pub mod info;
pub mod install;
pub mod settings;
pub mod tools;
