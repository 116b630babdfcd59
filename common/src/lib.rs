//! Shared building blocks for the sweep tool: configuration, the error
//! taxonomy, and the target/record data model used by every other crate.

pub mod config;
pub mod error;
pub mod network;
