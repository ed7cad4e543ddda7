//! Infrastructure layer
//!
//! Handles I/O operations: network, filesystem, host detection.

pub mod dirs;
pub mod download;
pub mod extract;
pub mod platform;
