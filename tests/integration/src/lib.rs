//! Integration test utilities for the demo server
//!
//! Spawns the real application, pool and schema bootstrap included, on an
//! ephemeral port and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
