//! Configuration constants
//!
//! Vendor URLs, on-disk names and defaults shared across the crate.

pub mod defaults;
pub mod urls;
