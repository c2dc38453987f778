//! Shared utilities: logging setup and the top-level error type.

pub mod error;
pub mod logging;
