//! AWS-facing adapters and the Lambda handler for object-created notifications.
//!
//! This crate owns runtime integration details (blob-store and key-value store
//! adapters, process configuration, logging) and delegates parsing, analysis,
//! and response contracts to `lowercase_stats_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
