//! Error handling module
//!
//! Defines the error kinds surfaced to the user and their exit codes

pub mod types;

pub use types::*;
