//! Core building blocks shared by every infostamp task
//!
//! - **config**: stamp.toml parsing and validation
//! - **context**: loaded config and file service shared by all commands
//! - **error**: error types with contextual help messages and exit codes
//! - **io**: injected file service and line-ending preserving line reader

pub mod config;
pub mod context;
pub mod error;
pub mod io;
