//! Command-line interface module
//!
//! Interprets the flag grammar and renders the usage text

pub mod args;
pub mod help;

pub use args::*;
pub use help::usage;
