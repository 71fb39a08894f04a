//! Pure domain primitives for the object-created lowercase statistics handler.
//!
//! This crate owns notification parsing, text analysis, and the
//! request/response contracts. It intentionally excludes AWS SDK and Lambda
//! runtime concerns, which live in `lowercase_stats_lambda`.

pub mod analysis;
pub mod contract;
pub mod notification;
