//! Git operations module
//!
//! Resolves repository references and clones them with the `git` client

pub mod clone;
pub mod repository;

pub use clone::*;
pub use repository::*;
